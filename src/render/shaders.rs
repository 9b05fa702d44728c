use gl::types::*;
use std::ffi::{CString, NulError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::ptr;
use thiserror::Error;

use super::uniforms::{Uniform, UniformCache, MISSING_LOCATION};

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("Failed to read shader file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{stage} source contains a nul byte: {source}")]
    Nul { stage: ShaderStage, source: NulError },

    #[error("{stage} failed to compile{}: {log}", describe_origin(.origin))]
    Compilation {
        stage: ShaderStage,
        origin: Option<PathBuf>,
        log: String,
    },

    #[error("Shader program failed to link: {0}")]
    Linking(String),

    #[error("Shader program is missing a {0}")]
    MissingStage(ShaderStage),
}

fn describe_origin(origin: &Option<PathBuf>) -> String {
    origin
        .as_ref()
        .map(|path| format!(" ({})", path.display()))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
            ShaderStage::Geometry => gl::GEOMETRY_SHADER,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "Vertex Shader",
            ShaderStage::Fragment => "Fragment Shader",
            ShaderStage::Geometry => "Geometry Shader",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// GLSL text for one pipeline stage, remembering which file it came from so
/// compile errors can point at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub stage: ShaderStage,
    pub code: String,
    pub origin: Option<PathBuf>,
}

impl ShaderSource {
    pub fn new(stage: ShaderStage, code: impl Into<String>) -> Self {
        Self {
            stage,
            code: code.into(),
            origin: None,
        }
    }

    pub fn from_file<P: AsRef<Path>>(stage: ShaderStage, path: P) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let code = fs::read_to_string(path).map_err(|source| ShaderError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            stage,
            code,
            origin: Some(path.to_path_buf()),
        })
    }

    pub fn to_cstring(&self) -> Result<CString, ShaderError> {
        CString::new(self.code.as_bytes()).map_err(|source| ShaderError::Nul {
            stage: self.stage,
            source,
        })
    }
}

/// A linked GPU program. The program handle is deleted on drop.
pub struct ShaderProgram {
    id: GLuint,
    uniforms: UniformCache,
}

impl ShaderProgram {
    pub fn from_files<P: AsRef<Path>>(vertex_path: P, fragment_path: P) -> Result<Self, ShaderError> {
        let vertex = ShaderSource::from_file(ShaderStage::Vertex, vertex_path)?;
        let fragment = ShaderSource::from_file(ShaderStage::Fragment, fragment_path)?;
        Self::from_stages(&[vertex, fragment])
    }

    pub fn from_sources(vertex_source: &str, fragment_source: &str) -> Result<Self, ShaderError> {
        Self::from_stages(&[
            ShaderSource::new(ShaderStage::Vertex, vertex_source),
            ShaderSource::new(ShaderStage::Fragment, fragment_source),
        ])
    }

    /// Compiles every stage and links them into one program. A vertex and a
    /// fragment stage are required; a geometry stage is optional.
    pub fn from_stages(sources: &[ShaderSource]) -> Result<Self, ShaderError> {
        check_required_stages(sources)?;

        let mut shaders = Vec::with_capacity(sources.len());
        for source in sources {
            match compile_shader(source) {
                Ok(shader) => shaders.push(shader),
                Err(e) => {
                    delete_shaders(&shaders);
                    return Err(e);
                }
            }
        }

        let program = unsafe { gl::CreateProgram() };
        unsafe {
            for shader in &shaders {
                gl::AttachShader(program, *shader);
            }
            gl::LinkProgram(program);
            for shader in &shaders {
                gl::DetachShader(program, *shader);
            }
        }
        delete_shaders(&shaders);

        let mut success = GLint::from(gl::FALSE);
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        }

        if success == GLint::from(gl::FALSE) {
            let log = program_info_log(program);
            unsafe {
                gl::DeleteProgram(program);
            }
            return Err(ShaderError::Linking(log));
        }

        log::debug!("Linked shader program {} from {} stages", program, sources.len());

        Ok(Self {
            id: program,
            uniforms: UniformCache::new(),
        })
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn use_program(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    pub fn uniform_location(&mut self, name: &str) -> GLint {
        let program = self.id;
        self.uniforms.location(name, |name| match CString::new(name) {
            Ok(cname) => unsafe { gl::GetUniformLocation(program, cname.as_ptr()) },
            Err(_) => MISSING_LOCATION,
        })
    }

    /// Binds the program and uploads `value` to the uniform called `name`.
    pub fn set_uniform<T: Uniform>(&mut self, name: &str, value: T) {
        self.use_program();
        let location = self.uniform_location(name);
        value.upload(location);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

fn check_required_stages(sources: &[ShaderSource]) -> Result<(), ShaderError> {
    for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
        if !sources.iter().any(|source| source.stage == stage) {
            return Err(ShaderError::MissingStage(stage));
        }
    }
    Ok(())
}

fn compile_shader(source: &ShaderSource) -> Result<GLuint, ShaderError> {
    let code = source.to_cstring()?;
    let shader = unsafe { gl::CreateShader(source.stage.gl_enum()) };

    unsafe {
        gl::ShaderSource(shader, 1, &code.as_ptr(), ptr::null());
        gl::CompileShader(shader);
    }

    let mut success = GLint::from(gl::FALSE);
    unsafe {
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
    }

    if success == GLint::from(gl::FALSE) {
        let log = shader_info_log(shader);
        unsafe {
            gl::DeleteShader(shader);
        }
        return Err(ShaderError::Compilation {
            stage: source.stage,
            origin: source.origin.clone(),
            log,
        });
    }

    Ok(shader)
}

fn delete_shaders(shaders: &[GLuint]) {
    for shader in shaders {
        unsafe {
            gl::DeleteShader(*shader);
        }
    }
}

fn shader_info_log(shader: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
    }

    let mut buffer = vec![0u8; len.max(1) as usize];
    let mut written = 0;
    unsafe {
        gl::GetShaderInfoLog(
            shader,
            buffer.len() as GLsizei,
            &mut written,
            buffer.as_mut_ptr() as *mut GLchar,
        );
    }
    log_to_string(buffer, written)
}

fn program_info_log(program: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
    }

    let mut buffer = vec![0u8; len.max(1) as usize];
    let mut written = 0;
    unsafe {
        gl::GetProgramInfoLog(
            program,
            buffer.len() as GLsizei,
            &mut written,
            buffer.as_mut_ptr() as *mut GLchar,
        );
    }
    log_to_string(buffer, written)
}

fn log_to_string(mut buffer: Vec<u8>, written: GLsizei) -> String {
    buffer.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buffer).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_stage_labels() {
        assert_eq!(ShaderStage::Vertex.to_string(), "Vertex Shader");
        assert_eq!(ShaderStage::Fragment.label(), "Fragment Shader");
        assert_eq!(ShaderStage::Geometry.gl_enum(), gl::GEOMETRY_SHADER);
    }

    #[test]
    fn test_source_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#version 330 core\nvoid main() {{}}\n").unwrap();

        let source = ShaderSource::from_file(ShaderStage::Vertex, file.path()).unwrap();
        assert_eq!(source.stage, ShaderStage::Vertex);
        assert!(source.code.starts_with("#version 330 core"));
        assert_eq!(source.origin.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_missing_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.frag");

        match ShaderSource::from_file(ShaderStage::Fragment, &path) {
            Err(ShaderError::Read { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected read error, got {:?}", other),
        }
    }

    #[test]
    fn test_nul_byte_in_source() {
        let source = ShaderSource::new(ShaderStage::Fragment, "void main() {\0}");
        assert!(matches!(
            source.to_cstring(),
            Err(ShaderError::Nul {
                stage: ShaderStage::Fragment,
                ..
            })
        ));
    }

    #[test]
    fn test_required_stages() {
        let vertex = ShaderSource::new(ShaderStage::Vertex, "");
        let fragment = ShaderSource::new(ShaderStage::Fragment, "");
        let geometry = ShaderSource::new(ShaderStage::Geometry, "");

        assert!(check_required_stages(&[vertex.clone(), fragment.clone()]).is_ok());
        assert!(check_required_stages(&[vertex.clone(), geometry, fragment]).is_ok());
        assert!(matches!(
            check_required_stages(&[vertex]),
            Err(ShaderError::MissingStage(ShaderStage::Fragment))
        ));
    }

    #[test]
    fn test_compilation_error_message() {
        let error = ShaderError::Compilation {
            stage: ShaderStage::Fragment,
            origin: Some(PathBuf::from("assets/shaders/cube.frag")),
            log: "0:3: syntax error".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Fragment Shader failed to compile (assets/shaders/cube.frag): 0:3: syntax error"
        );

        let error = ShaderError::Compilation {
            stage: ShaderStage::Vertex,
            origin: None,
            log: "bad".to_string(),
        };
        assert_eq!(error.to_string(), "Vertex Shader failed to compile: bad");
    }

    #[test]
    fn test_log_truncated_to_written_length() {
        let buffer = b"error here\n\0\0\0".to_vec();
        assert_eq!(log_to_string(buffer, 11), "error here");
    }
}
