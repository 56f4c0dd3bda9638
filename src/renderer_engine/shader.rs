use gl::types::*;
use regex::Regex;
use std::{ffi::CString, path::Path, ptr};

use crate::renderer_engine::RenderError;

/// Vertex shader du `SpriteBatch`. Les locations suivent `Vertex2::attributes()`.
pub const SPRITE_VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec3 v_pos;
layout (location = 1) in vec2 v_tex;
layout (location = 2) in vec4 v_col;

out vec4 f_col;
out vec2 f_tex;

uniform mat4 MVP;

void main() {
    f_col = v_col;
    f_tex = v_tex;
    gl_Position = MVP * vec4(v_pos, 1.0);
}
"#;

pub const SPRITE_FRAGMENT_SHADER: &str = r#"#version 330 core
in vec4 f_col;
in vec2 f_tex;

out vec4 frag_color;

uniform sampler2D tex;

void main() {
    frag_color = texture(tex, f_tex) * f_col;
}
"#;

lazy_static::lazy_static! {
    /// Formats de log GLSL connus, dans l'ordre d'essai. Le groupe 1 est la ligne.
    /// - "0:12(105): ..."            (Mesa/Intel)
    /// - "0(12) : error ..."         (NVIDIA)
    /// - "ERROR: 0:12: ..."          (AMD)
    static ref GLSL_ERROR_PATTERNS: Vec<Regex> = [
        r"\d+:(\d+)\(\d+\)",
        r"\d+\((\d+)\)\s*:",
        r":\s*\d+:(\d+):",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect();
}

/// Compile et linke un programme à partir de fichiers GLSL.
///
/// # Safety
/// Un contexte OpenGL doit être courant sur ce thread.
pub unsafe fn try_compile_program_from_files<P: AsRef<Path>>(
    vertex_path: P,
    fragment_path: P,
) -> Result<u32, RenderError> {
    let read = |path: &Path| {
        std::fs::read_to_string(path)
            .map_err(|e| RenderError::Shader(format!("cannot read '{}': {}", path.display(), e)))
    };
    let vertex_src = read(vertex_path.as_ref())?;
    let fragment_src = read(fragment_path.as_ref())?;
    try_compile_program(&vertex_src, &fragment_src)
}

/// Compile et linke un programme. Les erreurs de compilation embarquent
/// un extrait du source autour de la ligne fautive.
///
/// # Safety
/// Un contexte OpenGL doit être courant sur ce thread.
pub unsafe fn try_compile_program(vertex_src: &str, fragment_src: &str) -> Result<u32, RenderError> {
    let vs = compile_stage(vertex_src, gl::VERTEX_SHADER)?;
    let fs = match compile_stage(fragment_src, gl::FRAGMENT_SHADER) {
        Ok(fs) => fs,
        Err(e) => {
            gl::DeleteShader(vs);
            return Err(e);
        }
    };

    let program = gl::CreateProgram();
    gl::AttachShader(program, vs);
    gl::AttachShader(program, fs);
    gl::LinkProgram(program);
    gl::DeleteShader(vs);
    gl::DeleteShader(fs);

    let mut success = gl::FALSE as GLint;
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
    if success != gl::TRUE as GLint {
        let mut len = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = vec![0u8; len.max(0) as usize];
        gl::GetProgramInfoLog(program, len, ptr::null_mut(), buf.as_mut_ptr() as *mut GLchar);
        gl::DeleteProgram(program);
        return Err(RenderError::Shader(format!(
            "link failed:\n{}",
            info_log_to_string(&buf)
        )));
    }
    Ok(program)
}

unsafe fn compile_stage(src: &str, stage: GLenum) -> Result<u32, RenderError> {
    let c_src = CString::new(src).map_err(|e| RenderError::Shader(format!("CString error: {}", e)))?;

    let shader = gl::CreateShader(stage);
    gl::ShaderSource(shader, 1, &c_src.as_ptr(), ptr::null());
    gl::CompileShader(shader);

    let mut success = gl::FALSE as GLint;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
    if success == gl::TRUE as GLint {
        return Ok(shader);
    }

    let mut len = 0;
    gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
    let mut buf = vec![0u8; len.max(0) as usize];
    gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buf.as_mut_ptr() as *mut GLchar);
    gl::DeleteShader(shader);

    let log = info_log_to_string(&buf);
    let stage_name = if stage == gl::VERTEX_SHADER {
        "vertex"
    } else {
        "fragment"
    };
    let mut message = format!("{} shader compilation failed:\n{}", stage_name, log);
    if let Some(line) = parse_glsl_error_line(&log) {
        message.push_str(&format_glsl_error_context(src, line));
    }
    Err(RenderError::Shader(message))
}

fn info_log_to_string(buf: &[u8]) -> String {
    String::from_utf8_lossy(buf)
        .trim_matches(char::from(0))
        .trim_end()
        .to_string()
}

/// Numéro de ligne (1-based) de la première erreur du log GLSL.
pub fn parse_glsl_error_line(log: &str) -> Option<usize> {
    GLSL_ERROR_PATTERNS.iter().find_map(|re| {
        re.captures(log)
            .and_then(|cap| cap.get(1))
            .and_then(|m| m.as_str().parse().ok())
    })
}

/// Extrait du source : 2 lignes de contexte de part et d'autre, ligne fautive marquée `>`.
pub fn format_glsl_error_context(src: &str, line_number: usize) -> String {
    const CONTEXT: usize = 2;

    let lines: Vec<&str> = src.lines().collect();
    if line_number == 0 || line_number > lines.len() {
        return String::new();
    }

    let first = line_number.saturating_sub(CONTEXT + 1);
    let last = (line_number + CONTEXT).min(lines.len());

    let mut out = format!("\n🔍 Error context (line {}):\n", line_number);
    for (idx, line) in lines[first..last].iter().enumerate() {
        let current = first + idx + 1;
        let marker = if current == line_number { '>' } else { ' ' };
        out.push_str(&format!("{} {:>3} | {}\n", marker, current, line));
    }
    out
}
