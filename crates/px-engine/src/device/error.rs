use thiserror::Error;

/// GPU resource created while building a backend.
///
/// Used to tag construction failures so callers can tell which resource failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResourceKind {
    Adapter,
    Device,
    Swapchain,
    BackBuffer,
    RenderTarget,
    Texture,
    ShaderResourceView,
    PixelShader,
    VertexShader,
    VertexBuffer,
    InputLayout,
    Sampler,
    UploadBuffer,
}

impl ResourceKind {
    /// Every kind, in construction order.
    pub const ALL: [ResourceKind; 13] = [
        ResourceKind::Adapter,
        ResourceKind::Device,
        ResourceKind::Swapchain,
        ResourceKind::BackBuffer,
        ResourceKind::RenderTarget,
        ResourceKind::Texture,
        ResourceKind::ShaderResourceView,
        ResourceKind::PixelShader,
        ResourceKind::VertexShader,
        ResourceKind::VertexBuffer,
        ResourceKind::InputLayout,
        ResourceKind::Sampler,
        ResourceKind::UploadBuffer,
    ];

    /// Wraps a backend message into the matching `GraphicsError` variant.
    pub fn error(self, detail: impl Into<String>) -> GraphicsError {
        let detail = detail.into();
        match self {
            ResourceKind::Adapter => GraphicsError::Adapter(detail),
            ResourceKind::Device => GraphicsError::Device(detail),
            ResourceKind::Swapchain => GraphicsError::Swapchain(detail),
            ResourceKind::BackBuffer => GraphicsError::BackBuffer(detail),
            ResourceKind::RenderTarget => GraphicsError::RenderTarget(detail),
            ResourceKind::Texture => GraphicsError::Texture(detail),
            ResourceKind::ShaderResourceView => GraphicsError::ShaderResourceView(detail),
            ResourceKind::PixelShader => GraphicsError::PixelShader(detail),
            ResourceKind::VertexShader => GraphicsError::VertexShader(detail),
            ResourceKind::VertexBuffer => GraphicsError::VertexBuffer(detail),
            ResourceKind::InputLayout => GraphicsError::InputLayout(detail),
            ResourceKind::Sampler => GraphicsError::Sampler(detail),
            ResourceKind::UploadBuffer => GraphicsError::UploadBuffer(detail),
        }
    }
}

/// Failure while constructing a `Graphics` and its GPU resources.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphicsError {
    #[error("surface has zero size ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("could not find a suitable GPU adapter: {0}")]
    Adapter(String),

    #[error("could not create GPU device: {0}")]
    Device(String),

    #[error("could not create swapchain surface: {0}")]
    Swapchain(String),

    #[error("could not retrieve a presentable back buffer format: {0}")]
    BackBuffer(String),

    #[error("could not configure render target: {0}")]
    RenderTarget(String),

    #[error("could not create GPU texture: {0}")]
    Texture(String),

    #[error("could not create shader resource view: {0}")]
    ShaderResourceView(String),

    #[error("could not create pixel shader: {0}")]
    PixelShader(String),

    #[error("could not create vertex shader: {0}")]
    VertexShader(String),

    #[error("could not create vertex buffer: {0}")]
    VertexBuffer(String),

    #[error("could not create input layout: {0}")]
    InputLayout(String),

    #[error("could not create sampler: {0}")]
    Sampler(String),

    #[error("could not create texture upload buffer: {0}")]
    UploadBuffer(String),
}

impl GraphicsError {
    /// The resource that failed, `None` for size validation errors.
    pub fn resource(&self) -> Option<ResourceKind> {
        let kind = match self {
            GraphicsError::EmptySurface { .. } => return None,
            GraphicsError::Adapter(_) => ResourceKind::Adapter,
            GraphicsError::Device(_) => ResourceKind::Device,
            GraphicsError::Swapchain(_) => ResourceKind::Swapchain,
            GraphicsError::BackBuffer(_) => ResourceKind::BackBuffer,
            GraphicsError::RenderTarget(_) => ResourceKind::RenderTarget,
            GraphicsError::Texture(_) => ResourceKind::Texture,
            GraphicsError::ShaderResourceView(_) => ResourceKind::ShaderResourceView,
            GraphicsError::PixelShader(_) => ResourceKind::PixelShader,
            GraphicsError::VertexShader(_) => ResourceKind::VertexShader,
            GraphicsError::VertexBuffer(_) => ResourceKind::VertexBuffer,
            GraphicsError::InputLayout(_) => ResourceKind::InputLayout,
            GraphicsError::Sampler(_) => ResourceKind::Sampler,
            GraphicsError::UploadBuffer(_) => ResourceKind::UploadBuffer,
        };
        Some(kind)
    }
}

/// Per-frame failure from `Graphics::render`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The texture upload region could not be mapped for writing.
    #[error("could not map texture for writing: {0}")]
    Map(String),

    /// The swapchain refused the frame. The caller may retry next frame.
    #[error("could not present frame: {0}")]
    Present(#[source] wgpu::SurfaceError),

    /// The GPU device was lost; the owner must rebuild its graphics.
    #[error("GPU device lost: {reason}")]
    DeviceLost { reason: String },
}

impl RenderError {
    #[inline]
    pub fn is_device_lost(&self) -> bool {
        matches!(self, RenderError::DeviceLost { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_maps_back_to_itself() {
        for kind in ResourceKind::ALL {
            let err = kind.error("boom");
            assert_eq!(err.resource(), Some(kind));
            assert!(err.to_string().contains("boom"));
        }
    }

    #[test]
    fn empty_surface_has_no_resource() {
        let err = GraphicsError::EmptySurface { width: 0, height: 10 };
        assert_eq!(err.resource(), None);
        assert_eq!(err.to_string(), "surface has zero size (0x10)");
    }

    #[test]
    fn device_lost_is_distinct_from_present_failure() {
        let lost = RenderError::DeviceLost { reason: "removed".into() };
        let present = RenderError::Present(wgpu::SurfaceError::Timeout);
        assert!(lost.is_device_lost());
        assert!(!present.is_device_lost());
        assert_ne!(lost.to_string(), present.to_string());
    }
}
