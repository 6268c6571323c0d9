/// Picks the presentation format for the swapchain.
///
/// Eight-bit RGBA/BGRA formats are preferred, linear unless `prefer_srgb` is set.
/// Falls back to the first supported format. `None` when the surface reports no
/// formats at all (nothing can be presented).
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if formats.is_empty() {
        return None;
    }

    let preferred = if prefer_srgb {
        [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ]
    } else {
        [wgpu::TextureFormat::Rgba8Unorm, wgpu::TextureFormat::Bgra8Unorm]
    };

    for f in preferred {
        if formats.contains(&f) {
            return Some(f);
        }
    }

    Some(formats[0])
}

pub(crate) fn choose_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    [wgpu::CompositeAlphaMode::Opaque]
        .into_iter()
        .find(|m| modes.contains(m))
        .or_else(|| modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Row pitch of the upload region for `width` pixels of 4 bytes.
///
/// Buffer-to-texture copies require `bytes_per_row` to be a multiple of
/// `wgpu::COPY_BYTES_PER_ROW_ALIGNMENT`.
pub(crate) fn padded_row_pitch(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as F;

    #[test]
    fn linear_rgba_preferred() {
        let formats = [F::Bgra8UnormSrgb, F::Bgra8Unorm, F::Rgba8Unorm];
        assert_eq!(choose_surface_format(&formats, false), Some(F::Rgba8Unorm));
    }

    #[test]
    fn srgb_preferred_when_requested() {
        let formats = [F::Rgba8Unorm, F::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(F::Bgra8UnormSrgb));
    }

    #[test]
    fn falls_back_to_first() {
        let formats = [F::Rgb10a2Unorm, F::Rgba16Float];
        assert_eq!(choose_surface_format(&formats, false), Some(F::Rgb10a2Unorm));
    }

    #[test]
    fn no_formats_is_none() {
        assert_eq!(choose_surface_format(&[], false), None);
    }

    #[test]
    fn opaque_alpha_preferred() {
        use wgpu::CompositeAlphaMode as A;
        assert_eq!(choose_alpha_mode(&[A::PreMultiplied, A::Opaque]), A::Opaque);
        assert_eq!(choose_alpha_mode(&[A::PostMultiplied]), A::PostMultiplied);
        assert_eq!(choose_alpha_mode(&[]), A::Auto);
    }

    #[test]
    fn row_pitch_is_aligned() {
        assert_eq!(padded_row_pitch(4), 256);
        assert_eq!(padded_row_pitch(64), 256);
        assert_eq!(padded_row_pitch(65), 512);
        assert_eq!(padded_row_pitch(640), 2560);
    }
}
