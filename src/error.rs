//! Error types
//!
//! Startup failures are fatal and bubble up to `main`. Per-frame problems are
//! logged by whoever hit them and the next frame proceeds.

/// Failures raised by a [`RenderDevice`](crate::renderer::RenderDevice)
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no compatible graphics adapter: {0}")]
    AdapterUnavailable(String),

    #[error("graphics device request failed: {0}")]
    DeviceRequest(String),

    #[error("surface creation failed: {0}")]
    SurfaceCreation(String),

    #[error("surface is not supported by the adapter")]
    UnsupportedSurface,

    #[error("out of GPU memory")]
    OutOfMemory,

    #[error("unknown {kind} handle {index}")]
    UnknownHandle { kind: &'static str, index: u32 },

    #[error("textured pipeline '{label}' drawn without a texture")]
    MissingTexture { label: String },

    #[error("pipeline '{label}' could not be created: {reason}")]
    PipelineCreation { label: String, reason: String },
}

/// Top-level engine errors
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("component '{name}' failed to initialize: {source}")]
    ComponentInit {
        name: String,
        #[source]
        source: RenderError,
    },

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
