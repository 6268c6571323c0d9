/// Knobs for building a [`WgpuBackend`](super::WgpuBackend).
///
/// The defaults match what a pixel blitter wants: raw channel values, vsync
/// pacing, one frame in flight.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the instance may pick an adapter from.
    pub backends: wgpu::Backends,

    pub power_preference: wgpu::PowerPreference,

    /// Choose an sRGB swapchain format when one exists.
    ///
    /// Off: pixel bytes reach the display without any transfer function applied.
    pub prefer_srgb: bool,

    /// `Fifo` makes `present` wait for vertical blank.
    pub present_mode: wgpu::PresentMode,

    /// Hint for the number of queued frames; backends may ignore it.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pace_to_vsync_without_gamma() {
        let init = GpuInit::default();
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
        assert_eq!(init.desired_maximum_frame_latency, 1);
        assert!(!init.prefer_srgb);
    }
}
