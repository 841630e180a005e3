/// Fatal failures while bringing up the GPU and the line pipeline.
///
/// None of these are recoverable; the application reports them and exits.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("failed to compile shader `{label}`: {log}")]
    ShaderCompile { label: &'static str, log: String },
    #[error("failed to link line pipeline: {log}")]
    PipelineLink { log: String },
}
