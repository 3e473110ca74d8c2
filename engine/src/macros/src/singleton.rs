use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

pub fn derive_singleton(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let ast = parse_macro_input!(input as DeriveInput);

    // Get the struct name we are annotating
    let struct_name = &ast.ident;

    // The marker impl keeps the default no-op `on_init`. Types that need the
    // hook implement the trait by hand instead of deriving it.
    TokenStream::from(quote! {
        impl ::stagecraft::Singleton for #struct_name {
        }
    })
}
