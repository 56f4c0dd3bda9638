use gl::types::*;
use log::{debug, error, info, warn, Level};
use std::collections::HashMap;
use std::ffi::CStr;
use std::os::raw::c_void;
use std::sync::Mutex;

lazy_static::lazy_static! {
    /// Nombre d'occurrences par id de message GL debug.
    static ref MESSAGE_COUNT: Mutex<HashMap<u32, u32>> = Mutex::new(HashMap::new());
}

/// Un message répété n'est relogué que toutes les `REPEAT_LOG_PERIOD` occurrences.
const REPEAT_LOG_PERIOD: u32 = 60;

#[macro_export]
macro_rules! cstr {
    ($s:expr) => {
        concat!($s, "\0").as_ptr() as *const i8
    };
}

/// Affiche les informations OpenGL / GPU du contexte actuel
///
/// # Safety
/// L'appelant doit s'assurer que le contexte OpenGL est valide et actif.
pub unsafe fn show_opengl_context_info() {
    let get = |name: GLenum| {
        let raw = gl::GetString(name);
        if raw.is_null() {
            "Unknown".to_string()
        } else {
            CStr::from_ptr(raw as *const i8).to_string_lossy().into_owned()
        }
    };

    info!("🖥 OpenGL context info:");
    info!("  Vendor   : {}", get(gl::VENDOR));
    info!("  Renderer : {}", get(gl::RENDERER));
    info!("  OpenGL   : {}", get(gl::VERSION));
    info!("  GLSL     : {}", get(gl::SHADING_LANGUAGE_VERSION));

    let mut max_texture_size = 0;
    gl::GetIntegerv(gl::MAX_TEXTURE_SIZE, &mut max_texture_size);
    debug!("  Max texture size: {}", max_texture_size);

    check_gl_error("show_opengl_context_info");
}

/// Nom symbolique d'un code `glGetError`.
pub fn gl_error_name(code: GLenum) -> &'static str {
    match code {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "GL_UNKNOWN_ERROR",
    }
}

/// Vide la file `glGetError` et retourne le premier code rencontré.
///
/// # Safety
/// Un contexte OpenGL doit être courant sur ce thread.
pub unsafe fn check_gl_error(context: &str) -> Option<GLenum> {
    let mut first = None;
    loop {
        let code = gl::GetError();
        if code == gl::NO_ERROR {
            break;
        }
        warn!("{} after {} (0x{:X})", gl_error_name(code), context, code);
        first.get_or_insert(code);
    }
    first
}

/// Niveau de log d'un message GL debug ; `None` pour les notifications.
pub fn debug_severity_level(severity: GLenum) -> Option<Level> {
    match severity {
        gl::DEBUG_SEVERITY_HIGH => Some(Level::Error),
        gl::DEBUG_SEVERITY_MEDIUM => Some(Level::Warn),
        gl::DEBUG_SEVERITY_LOW => Some(Level::Debug),
        _ => None,
    }
}

fn debug_source_name(source: GLenum) -> &'static str {
    match source {
        gl::DEBUG_SOURCE_API => "API",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        gl::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        gl::DEBUG_SOURCE_APPLICATION => "Application",
        _ => "Other",
    }
}

fn debug_type_name(type_: GLenum) -> &'static str {
    match type_ {
        gl::DEBUG_TYPE_ERROR => "Error",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated Behavior",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        gl::DEBUG_TYPE_PORTABILITY => "Portability",
        gl::DEBUG_TYPE_PERFORMANCE => "Performance",
        _ => "Other",
    }
}

/// Incrémente le compteur de `id` et indique s'il faut loguer cette occurrence.
fn should_log_message(id: u32) -> bool {
    let Ok(mut counts) = MESSAGE_COUNT.lock() else {
        return true;
    };
    let count = counts.entry(id).or_insert(0);
    *count += 1;
    *count == 1 || (*count).is_multiple_of(REPEAT_LOG_PERIOD)
}

extern "system" fn gl_debug_callback(
    source: GLenum,
    type_: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    let Some(level) = debug_severity_level(severity) else {
        return;
    };
    if message.is_null() || !should_log_message(id) {
        return;
    }

    let msg = unsafe { CStr::from_ptr(message).to_string_lossy() };
    let line = format!(
        "[OpenGL Debug] id: {:X}, source: {}, type: {}, message: {}",
        id,
        debug_source_name(source),
        debug_type_name(type_),
        msg
    );
    match level {
        Level::Error => error!("{}", line),
        Level::Warn => warn!("{}", line),
        _ => debug!("{}", line),
    }
}

/// Configure le debug OpenGL via `glDebugMessageCallback`.
///
/// # Safety
/// Le contexte OpenGL doit être actif et supporter `KHR_debug` (GL 4.3+).
pub unsafe fn setup_opengl_debug() {
    gl::Enable(gl::DEBUG_OUTPUT);
    gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
    gl::DebugMessageCallback(Some(gl_debug_callback), std::ptr::null());
    gl::DebugMessageControl(
        gl::DONT_CARE,
        gl::DONT_CARE,
        gl::DONT_CARE,
        0,
        std::ptr::null(),
        gl::TRUE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cstr_macro_is_nul_terminated() {
        for (ptr, expected) in [(cstr!("MVP"), "MVP"), (cstr!("tex"), "tex"), (cstr!(""), "")] {
            let s = unsafe { CStr::from_ptr(ptr) };
            assert_eq!(s.to_str().unwrap(), expected);
        }
    }

    #[test]
    fn test_gl_error_names() {
        assert_eq!(gl_error_name(gl::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
        assert_eq!(gl_error_name(gl::INVALID_OPERATION), "GL_INVALID_OPERATION");
        assert_eq!(gl_error_name(0xDEAD), "GL_UNKNOWN_ERROR");
    }

    #[test]
    fn test_severity_mapping_skips_notifications() {
        assert_eq!(debug_severity_level(gl::DEBUG_SEVERITY_HIGH), Some(Level::Error));
        assert_eq!(debug_severity_level(gl::DEBUG_SEVERITY_MEDIUM), Some(Level::Warn));
        assert_eq!(debug_severity_level(gl::DEBUG_SEVERITY_LOW), Some(Level::Debug));
        assert_eq!(debug_severity_level(gl::DEBUG_SEVERITY_NOTIFICATION), None);
    }

    #[test]
    fn test_repeated_messages_are_throttled() {
        let id = 0x5B_A7C4;
        let logged: Vec<bool> = (0..REPEAT_LOG_PERIOD).map(|_| should_log_message(id)).collect();
        assert!(logged[0]);
        assert!(logged[1..REPEAT_LOG_PERIOD as usize - 1].iter().all(|l| !l));
        assert!(logged[REPEAT_LOG_PERIOD as usize - 1]);
    }

    #[test]
    fn test_callback_counts_non_notification_messages() {
        let id = 0x5B_A7C5;
        let msg = std::ffi::CString::new("buffer usage hint").unwrap();
        for severity in [gl::DEBUG_SEVERITY_NOTIFICATION, gl::DEBUG_SEVERITY_MEDIUM] {
            gl_debug_callback(
                gl::DEBUG_SOURCE_API,
                gl::DEBUG_TYPE_PERFORMANCE,
                id,
                severity,
                0,
                msg.as_ptr(),
                std::ptr::null_mut(),
            );
        }
        assert_eq!(MESSAGE_COUNT.lock().unwrap().get(&id), Some(&1));
    }
}
