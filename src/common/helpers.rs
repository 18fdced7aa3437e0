use std::ffi::CStr;

use tracing::info;

use super::{color::Color, errors::GlError, gl};

/// Logs renderer, version and GLSL strings of the current context.
///
/// # Safety
/// A GL context must be current and its functions loaded.
pub(crate) unsafe fn log_driver_info() {
    if let Some(renderer) = get_gl_string(gl::RENDERER) {
        info!("Running on {}", renderer.to_string_lossy());
    }
    if let Some(version) = get_gl_string(gl::VERSION) {
        info!("OpenGL Version {}", version.to_string_lossy());
    }
    if let Some(shaders_version) = get_gl_string(gl::SHADING_LANGUAGE_VERSION) {
        info!("Shaders version {}", shaders_version.to_string_lossy());
    }
}

/// Fails with the first pending error flag, if any.
///
/// # Safety
/// A GL context must be current and its functions loaded.
pub(crate) unsafe fn check_gl_error() -> Result<(), GlError> {
    match gl::GetError() {
        gl::NO_ERROR => Ok(()),
        code => Err(GlError::Driver(code)),
    }
}

/// # Safety
/// A GL context must be current and its functions loaded.
pub(crate) unsafe fn set_viewport(width: u32, height: u32) {
    let width = i32::try_from(width).unwrap_or(i32::MAX);
    let height = i32::try_from(height).unwrap_or(i32::MAX);
    gl::Viewport(0, 0, width, height);
}

/// Clears the color buffer, updating the clear color first when `changed` is set.
///
/// # Safety
/// A GL context must be current and its functions loaded.
pub(crate) unsafe fn clear(changed: Option<Color>) {
    if let Some(color) = changed {
        gl::ClearColor(color.r, color.g, color.b, color.a);
    }
    gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
}

unsafe fn get_gl_string(variant: gl::types::GLenum) -> Option<&'static CStr> {
    let s = gl::GetString(variant);
    (!s.is_null()).then(|| CStr::from_ptr(s.cast()))
}
