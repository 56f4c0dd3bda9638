use gl::types::*;
use glam::Mat4;
use image::GenericImageView;
use log::{debug, info};
use std::collections::HashMap;
use std::ffi::c_void;
use std::path::Path;
use std::ptr;

use crate::cstr;
use crate::renderer_engine::shader::{try_compile_program, SPRITE_FRAGMENT_SHADER, SPRITE_VERTEX_SHADER};
use crate::renderer_engine::tools::{check_gl_error, gl_error_name};
use crate::renderer_engine::{
    BufferHandle, Color, GpuBackend, RenderError, Texture2D, TextureFactory, TextureId,
    VertexAttribute,
};
use crate::utils::human_bytes::HumanBytes;

/// Pixels RGBA8 d'une texture unie.
pub fn solid_pixels(width: u32, height: u32, color: Color) -> Vec<u8> {
    let texel = color
        .clamp(Color::ZERO, Color::ONE)
        .to_array()
        .map(|c| (c * 255.0).round() as u8);
    texel.repeat((width * height) as usize)
}

/// Crée les textures GL. Sans état : chaque appel alloue une nouvelle texture.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlTextureFactory;

impl GlTextureFactory {
    /// Charge une image (png, jpg…) en RGBA8.
    ///
    /// L'image n'est pas retournée verticalement : la ligne 0 correspond à v = 0,
    /// ce qui colle à la caméra y-down du batch.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<Texture2D, RenderError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| RenderError::TextureLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();
        let texture = self.upload_rgba(width, height, rgba.as_raw());
        debug!("Texture '{}' loaded: {}x{} → {:?}", path.display(), width, height, texture.id());
        Ok(texture)
    }

    /// Envoie `pixels` (RGBA8, `width × height × 4` octets) dans une nouvelle texture.
    pub fn upload_rgba(&self, width: u32, height: u32, pixels: &[u8]) -> Texture2D {
        let mut name = 0;
        unsafe {
            gl::GenTextures(1, &mut name);
            gl::BindTexture(gl::TEXTURE_2D, name);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA as i32,
                width as i32,
                height as i32,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr() as *const c_void,
            );
            gl::BindTexture(gl::TEXTURE_2D, 0);
        }
        Texture2D::from_gpu(name, width, height)
    }
}

impl TextureFactory for GlTextureFactory {
    fn create_solid(&self, width: u32, height: u32, color: Color) -> Texture2D {
        let (width, height) = (width.max(1), height.max(1));
        self.upload_rgba(width, height, &solid_pixels(width, height, color))
    }
}

/// Noms GL des textures 1×1 par défaut, créées au premier bind.
#[derive(Debug, Clone, Copy)]
struct BuiltinTextures {
    transparent: u32,
    dot: u32,
}

/// Implémentation OpenGL 3.3 core du [`GpuBackend`].
///
/// Possède le programme sprite, un VAO et les textures par défaut.
/// Doit être créé et utilisé sur le thread qui possède le contexte GL.
pub struct GlBackend {
    program: u32,
    loc_mvp: i32,
    vao: u32,
    factory: GlTextureFactory,
    builtins: Option<BuiltinTextures>,
    /// Taille allouée (octets) par vertex buffer.
    buffer_sizes: HashMap<u32, usize>,
}

impl GlBackend {
    /// # Safety
    /// Un contexte OpenGL doit être courant et `gl::load_with` déjà appelé.
    pub unsafe fn new() -> Result<Self, RenderError> {
        let program = try_compile_program(SPRITE_VERTEX_SHADER, SPRITE_FRAGMENT_SHADER)?;
        let loc_mvp = gl::GetUniformLocation(program, cstr!("MVP"));
        let loc_tex = gl::GetUniformLocation(program, cstr!("tex"));

        gl::UseProgram(program);
        gl::Uniform1i(loc_tex, 0);

        let mut vao = 0;
        gl::GenVertexArrays(1, &mut vao);

        gl::Enable(gl::BLEND);
        gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);

        info!("🎮 Sprite program ready (program={}, vao={})", program, vao);

        Ok(Self {
            program,
            loc_mvp,
            vao,
            factory: GlTextureFactory,
            builtins: None,
            buffer_sizes: HashMap::new(),
        })
    }

    pub fn texture_factory(&self) -> GlTextureFactory {
        self.factory
    }

    fn resolve(&mut self, texture: &Texture2D) -> u32 {
        let id = texture.id();
        if let TextureId::Gpu(name) = id {
            return name;
        }
        let factory = self.factory;
        let builtins = *self.builtins.get_or_insert_with(|| {
            debug!("Creating builtin 1×1 textures");
            BuiltinTextures {
                transparent: factory.create_solid(1, 1, Color::ZERO).gpu_name().unwrap_or(0),
                dot: factory.create_solid(1, 1, Color::ONE).gpu_name().unwrap_or(0),
            }
        });
        match id {
            TextureId::Dot => builtins.dot,
            _ => builtins.transparent,
        }
    }

    unsafe fn allocate(
        &mut self,
        target: GLenum,
        bytes: usize,
        data: *const c_void,
        usage: GLenum,
    ) -> Result<BufferHandle, RenderError> {
        let mut name = 0;
        gl::GenBuffers(1, &mut name);
        gl::BindVertexArray(self.vao);
        gl::BindBuffer(target, name);
        gl::BufferData(target, bytes as GLsizeiptr, data, usage);

        if let Some(code) = check_gl_error("glBufferData") {
            gl::DeleteBuffers(1, &name);
            return Err(RenderError::BufferAllocation {
                bytes,
                reason: gl_error_name(code).to_string(),
            });
        }
        debug!("GL buffer {} allocated: {}", name, bytes.human_bytes());
        self.buffer_sizes.insert(name, bytes);
        Ok(BufferHandle(name))
    }

    /// Libère le programme, le VAO et les textures par défaut.
    pub fn close(&mut self) {
        unsafe {
            if let Some(builtins) = self.builtins.take() {
                gl::DeleteTextures(2, [builtins.transparent, builtins.dot].as_ptr());
            }
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteProgram(self.program);
        }
        debug!("GlBackend closed.");
    }
}

impl GpuBackend for GlBackend {
    fn create_vertex_buffer(&mut self, byte_capacity: usize) -> Result<BufferHandle, RenderError> {
        unsafe { self.allocate(gl::ARRAY_BUFFER, byte_capacity, ptr::null(), gl::STREAM_DRAW) }
    }

    fn create_index_buffer(&mut self, indices: &[u32]) -> Result<BufferHandle, RenderError> {
        let bytes: &[u8] = bytemuck::cast_slice(indices);
        unsafe {
            self.allocate(
                gl::ELEMENT_ARRAY_BUFFER,
                bytes.len(),
                bytes.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            )
        }
    }

    fn upload_vertices(&mut self, buffer: BufferHandle, bytes: &[u8]) {
        let size = self.buffer_sizes.entry(buffer.0).or_insert(0);
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, buffer.0);
            if bytes.len() > *size {
                gl::BufferData(
                    gl::ARRAY_BUFFER,
                    bytes.len() as GLsizeiptr,
                    bytes.as_ptr() as *const c_void,
                    gl::STREAM_DRAW,
                );
                *size = bytes.len();
            } else {
                gl::BufferSubData(
                    gl::ARRAY_BUFFER,
                    0,
                    bytes.len() as GLsizeiptr,
                    bytes.as_ptr() as *const c_void,
                );
            }
        }
    }

    fn bind_attribute(&mut self, buffer: BufferHandle, attribute: VertexAttribute) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, buffer.0);
            gl::EnableVertexAttribArray(attribute.slot);
            gl::VertexAttribPointer(
                attribute.slot,
                attribute.components,
                gl::FLOAT,
                gl::FALSE,
                attribute.stride as GLsizei,
                attribute.offset as *const c_void,
            );
        }
    }

    fn bind_texture(&mut self, texture: &Texture2D) {
        let name = self.resolve(texture);
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0);
            gl::BindTexture(gl::TEXTURE_2D, name);
        }
    }

    fn set_view_projection(&mut self, view_projection: &Mat4) {
        unsafe {
            gl::UseProgram(self.program);
            gl::UniformMatrix4fv(
                self.loc_mvp,
                1,
                gl::FALSE,
                view_projection.to_cols_array().as_ptr(),
            );
        }
    }

    fn draw_indexed(&mut self, index_buffer: BufferHandle, index_count: usize) {
        unsafe {
            gl::UseProgram(self.program);
            gl::BindVertexArray(self.vao);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, index_buffer.0);
            gl::DrawElements(
                gl::TRIANGLES,
                index_count as GLsizei,
                gl::UNSIGNED_INT,
                ptr::null(),
            );
        }
    }

    fn release_buffer(&mut self, buffer: BufferHandle) {
        self.buffer_sizes.remove(&buffer.0);
        unsafe {
            gl::DeleteBuffers(1, &buffer.0);
        }
    }
}
