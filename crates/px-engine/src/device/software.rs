use crate::paint::Color;

use super::quad::QUAD_VERTICES;
use super::{Backend, GraphicsError, MappedTexture, RenderError, ResourceKind};

/// Byte value the upload region holds wherever nothing was written.
pub const DEFAULT_SENTINEL: u8 = 0xCD;

/// Builder for [`SoftwareBackend`].
///
/// Defaults mirror the wgpu upload path: rows aligned to
/// `wgpu::COPY_BYTES_PER_ROW_ALIGNMENT`, so the pitch exceeds `width * 4` for
/// most widths.
#[derive(Debug, Clone)]
pub struct SoftwareBackendBuilder {
    width: u32,
    height: u32,
    row_alignment: usize,
    sentinel: u8,
    fail_on: Option<ResourceKind>,
}

impl SoftwareBackendBuilder {
    /// Row pitch becomes `width * 4` rounded up to a multiple of `align` (min 1).
    pub fn row_alignment(mut self, align: usize) -> Self {
        self.row_alignment = align.max(1);
        self
    }

    /// Fill byte for the upload region.
    pub fn sentinel(mut self, byte: u8) -> Self {
        self.sentinel = byte;
        self
    }

    /// Makes construction fail when `kind` would be created.
    pub fn fail_on(mut self, kind: ResourceKind) -> Self {
        self.fail_on = Some(kind);
        self
    }

    /// Walks the same construction stages as the GPU backend.
    pub fn build(self) -> Result<SoftwareBackend, GraphicsError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(GraphicsError::EmptySurface { width, height });
        }

        for kind in ResourceKind::ALL {
            if self.fail_on == Some(kind) {
                log::debug!("software backend: injected {kind:?} failure");
                return Err(kind.error("injected failure"));
            }
        }

        let row_bytes = width as usize * 4;
        let row_pitch = row_bytes.div_ceil(self.row_alignment) * self.row_alignment;
        let texels = width as usize * height as usize;

        log::debug!("software backend {width}x{height}, row pitch {row_pitch}");

        Ok(SoftwareBackend {
            width,
            height,
            row_pitch,
            sentinel: self.sentinel,
            upload: vec![self.sentinel; row_pitch * height as usize],
            texture: vec![Color::default(); texels],
            back: vec![Color::default(); texels],
            front: vec![Color::default(); texels],
            drawn: false,
            frames_presented: 0,
            fail_map: false,
            fail_present: None,
            lost: None,
        })
    }
}

/// In-memory [`Backend`].
///
/// Behaves like the GPU path step for step: a padded upload region, a tight
/// texture filled from it on `draw`, a point-sampled quad rasterised into a back
/// buffer, and `present` swapping that into the visible front buffer.
/// Failures can be injected at any stage.
#[derive(Debug)]
pub struct SoftwareBackend {
    width: u32,
    height: u32,
    row_pitch: usize,
    sentinel: u8,

    upload: Vec<u8>,
    texture: Vec<Color>,
    back: Vec<Color>,
    front: Vec<Color>,

    drawn: bool,
    frames_presented: u64,

    fail_map: bool,
    fail_present: Option<wgpu::SurfaceError>,
    lost: Option<String>,
}

impl SoftwareBackend {
    pub fn builder(width: u32, height: u32) -> SoftwareBackendBuilder {
        SoftwareBackendBuilder {
            width,
            height,
            row_alignment: wgpu::COPY_BYTES_PER_ROW_ALIGNMENT as usize,
            sentinel: DEFAULT_SENTINEL,
            fail_on: None,
        }
    }

    /// Backend with default alignment and no injected failures.
    pub fn new(width: u32, height: u32) -> Result<Self, GraphicsError> {
        Self::builder(width, height).build()
    }

    #[inline]
    pub fn row_pitch(&self) -> usize {
        self.row_pitch
    }

    #[inline]
    pub fn sentinel(&self) -> u8 {
        self.sentinel
    }

    /// Raw upload region, padding included.
    pub fn upload_bytes(&self) -> &[u8] {
        &self.upload
    }

    /// Texture contents after the last `draw`.
    pub fn texture(&self) -> &[Color] {
        &self.texture
    }

    /// Last presented frame, row-major.
    pub fn presented(&self) -> &[Color] {
        &self.front
    }

    pub fn presented_pixel(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width && y < self.height)
            .then(|| self.front[y as usize * self.width as usize + x as usize])
    }

    #[inline]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    // ── fault injection ───────────────────────────────────────────────────

    pub fn set_fail_map(&mut self, fail: bool) {
        self.fail_map = fail;
    }

    /// Every following `present` fails with `err` until cleared with `None`.
    pub fn set_fail_present(&mut self, err: Option<wgpu::SurfaceError>) {
        self.fail_present = err;
    }

    /// Marks the device as lost; every later call reports `DeviceLost`.
    pub fn lose_device(&mut self, reason: impl Into<String>) {
        self.lost = Some(reason.into());
    }

    fn check_device(&self) -> Result<(), RenderError> {
        match &self.lost {
            Some(reason) => Err(RenderError::DeviceLost {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn upload_to_texture(&mut self) {
        let width = self.width as usize;
        for (y, row) in self.texture.chunks_exact_mut(width).enumerate() {
            let src = &self.upload[y * self.row_pitch..];
            for (x, texel) in row.iter_mut().enumerate() {
                let b = &src[x * 4..x * 4 + 4];
                *texel = Color::from_bgra_bytes([b[0], b[1], b[2], b[3]]);
            }
        }
    }

    /// Rasterises the quad at pixel centers with nearest/clamp sampling.
    fn draw_quad(&mut self) {
        let (w, h) = (self.width as usize, self.height as usize);

        // UV extents of the quad; top-left origin.
        let (u0, u1, v0, v1) = QUAD_VERTICES.iter().fold(
            (f32::MAX, f32::MIN, f32::MAX, f32::MIN),
            |(u0, u1, v0, v1), q| (u0.min(q.uv[0]), u1.max(q.uv[0]), v0.min(q.uv[1]), v1.max(q.uv[1])),
        );

        for py in 0..h {
            let v = v0 + (v1 - v0) * ((py as f32 + 0.5) / h as f32);
            let ty = ((v * h as f32) as usize).min(h - 1);
            for px in 0..w {
                let u = u0 + (u1 - u0) * ((px as f32 + 0.5) / w as f32);
                let tx = ((u * w as f32) as usize).min(w - 1);
                self.back[py * w + px] = self.texture[ty * w + tx];
            }
        }
    }
}

impl Backend for SoftwareBackend {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn map(&mut self) -> Result<MappedTexture<'_>, RenderError> {
        self.check_device()?;
        if self.fail_map {
            return Err(RenderError::Map("injected map failure".into()));
        }

        // Discard semantics: previous contents are gone.
        self.upload.fill(self.sentinel);
        Ok(MappedTexture::new(&mut self.upload[..], self.row_pitch))
    }

    fn draw(&mut self) -> Result<(), RenderError> {
        self.check_device()?;
        self.upload_to_texture();
        self.draw_quad();
        self.drawn = true;
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.check_device()?;
        if let Some(err) = &self.fail_present {
            self.drawn = false;
            return Err(RenderError::Present(err.clone()));
        }

        if std::mem::take(&mut self.drawn) {
            std::mem::swap(&mut self.front, &mut self.back);
            self.frames_presented += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn default_pitch_is_gpu_aligned() {
        let b = SoftwareBackend::new(4, 4).unwrap();
        assert_eq!(b.row_pitch(), 256);
        assert_eq!(b.upload_bytes().len(), 256 * 4);
        assert_eq!(b.size(), (4, 4));
    }

    #[test]
    fn custom_alignment() {
        let b = SoftwareBackend::builder(3, 2).row_alignment(16).build().unwrap();
        assert_eq!(b.row_pitch(), 16);
        let tight = SoftwareBackend::builder(3, 2).row_alignment(1).build().unwrap();
        assert_eq!(tight.row_pitch(), 12);
    }

    #[test]
    fn every_stage_can_fail() {
        for kind in ResourceKind::ALL {
            let err = SoftwareBackend::builder(2, 2).fail_on(kind).build().unwrap_err();
            assert_eq!(err.resource(), Some(kind));
        }
    }

    #[test]
    fn zero_size_rejected() {
        let err = SoftwareBackend::new(0, 3).unwrap_err();
        assert_eq!(err, GraphicsError::EmptySurface { width: 0, height: 3 });
    }

    // ── frame path ────────────────────────────────────────────────────────

    #[test]
    fn map_discards_previous_contents() {
        let mut b = SoftwareBackend::builder(1, 1).row_alignment(4).sentinel(0x11).build().unwrap();
        {
            let mut m = b.map().unwrap();
            m.bytes_mut().copy_from_slice(&[1, 2, 3, 4]);
        }
        assert_eq!(b.upload_bytes(), &[1, 2, 3, 4]);
        drop(b.map().unwrap());
        assert_eq!(b.upload_bytes(), &[0x11; 4]);
    }

    #[test]
    fn draw_then_present_shows_upload() {
        let mut b = SoftwareBackend::builder(2, 1).row_alignment(8).build().unwrap();
        {
            let mut m = b.map().unwrap();
            m.bytes_mut()[4..8].copy_from_slice(&[0, 0, 255, 255]); // BGRA red
            m.bytes_mut()[0..4].copy_from_slice(&[0, 0, 0, 0]);
        }
        b.draw().unwrap();
        assert_eq!(b.presented_pixel(1, 0), Some(Color::default()));

        b.present().unwrap();
        assert_eq!(b.presented_pixel(1, 0), Some(Color::rgb(255, 0, 0)));
        assert_eq!(b.presented_pixel(0, 0), Some(Color::default()));
        assert_eq!(b.frames_presented(), 1);
    }

    #[test]
    fn present_without_draw_keeps_frame() {
        let mut b = SoftwareBackend::new(2, 2).unwrap();
        b.present().unwrap();
        assert_eq!(b.frames_presented(), 0);
    }

    // ── faults ────────────────────────────────────────────────────────────

    #[test]
    fn injected_faults_surface_as_render_errors() {
        let mut b = SoftwareBackend::new(2, 2).unwrap();

        b.set_fail_map(true);
        assert!(matches!(b.map(), Err(RenderError::Map(_))));
        b.set_fail_map(false);

        b.set_fail_present(Some(wgpu::SurfaceError::Outdated));
        b.draw().unwrap();
        assert_eq!(
            b.present(),
            Err(RenderError::Present(wgpu::SurfaceError::Outdated))
        );
        b.set_fail_present(None);

        b.lose_device("driver reset");
        let err = b.draw().unwrap_err();
        assert!(err.is_device_lost());
        assert!(b.map().is_err());
    }
}
