use std::env;
use std::fs::File;
use std::path::PathBuf;

use cfg_aliases::cfg_aliases;
use gl_generator::{Api, Fallbacks, GlobalGenerator, Profile, Registry};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    cfg_aliases! {
        android_platform: { target_os = "android" },
        macos_platform: { target_os = "macos" },
        ios_platform: { target_os = "ios" },
        apple: { any(ios_platform, macos_platform) },
        free_unix: { all(unix, not(apple), not(android_platform)) },
        // winit only implements `pump_app_events` on these backends.
        pump_events: { any(windows, macos_platform, android_platform, free_unix) },
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let mut file = File::create(out_dir.join("gl_bindings.rs"))?;
    Registry::new(Api::Gl, (3, 3), Profile::Core, Fallbacks::All, [])
        .write_bindings(GlobalGenerator, &mut file)?;

    Ok(())
}
