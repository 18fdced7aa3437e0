//! OpenGL 3.3 core bindings generated by the build script.

#![allow(
    clippy::all,
    non_camel_case_types,
    non_snake_case,
    non_upper_case_globals,
    dead_code,
    unused_imports
)]

include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
