//! Find-or-create manager walkthrough: bootstrap managers, survive a
//! subsystem reset, and observe the teardown window.

use stagecraft::{
    Component, Lifecycle, Manager, Managers, Scene, Singleton, Singletons, Template, Templates,
};

#[derive(Component, Default)]
struct GameDirector {
    level: u32,
}

impl Manager for GameDirector {
    fn init(&mut self) {
        self.level = 1;
        println!("GameDirector ready at level {}", self.level);
    }
}

#[derive(Component, Default, Clone)]
struct AudioMixer {
    channels: u32,
}

impl Manager for AudioMixer {}

#[derive(Singleton, Default)]
struct FrameStats {
    frames: u64,
}

fn main() {
    let mut scene = Scene::new();
    let mut templates = Templates::new();
    let mut lifecycle = Lifecycle::new();
    let mut managers = Managers::new();
    let mut singletons = Singletons::new();

    // Pre-authored blueprint for the mixer; the director has none.
    templates.register(Template::new("AudioMixer").with(AudioMixer { channels: 8 }));

    // The host fires its subsystem signal once at load.
    lifecycle.subsystem_reset();
    singletons.reset();

    // No template named "GameDirector": a bare "[GameDirector]" object is
    // created, the component attached, and the init hook run.
    let director = managers
        .bootstrap::<GameDirector>(&mut scene, &templates, &mut lifecycle)
        .expect("director resolves");
    println!("director object: {:?}", scene.name(director));

    // The mixer instantiates from its template; the engine's clone suffix
    // is stripped from the object name.
    let mixer = managers
        .resolve::<AudioMixer>(&mut scene, &templates, &mut lifecycle)
        .expect("mixer resolves");
    let channels = scene.get::<AudioMixer>(mixer).map(|m| m.channels);
    println!("mixer object: {:?} ({channels:?} channels)", scene.name(mixer));

    // Plain singletons live outside the scene graph.
    singletons.instance::<FrameStats>().frames += 1;
    println!("frames: {}", singletons.instance::<FrameStats>().frames);

    // Destroying a manager object opens the teardown window: resolution
    // consistently comes up empty instead of resurrecting managers.
    scene.destroy(director);
    managers.object_destroyed(director, &mut lifecycle);
    let during_teardown = managers.resolve::<GameDirector>(&mut scene, &templates, &mut lifecycle);
    println!("resolve during teardown: {during_teardown:?}");

    // The next subsystem signal re-arms everything.
    lifecycle.subsystem_reset();
    let revived = managers
        .resolve::<GameDirector>(&mut scene, &templates, &mut lifecycle)
        .expect("director resolves again");
    println!("revived director object: {:?}", scene.name(revived));
}
