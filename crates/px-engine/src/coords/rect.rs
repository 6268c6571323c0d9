/// Client-area rectangle in physical pixels (top-left origin, edges half-open).
///
/// `left`/`top` position the drawable area on the desktop; `right`/`bottom`
/// are exclusive. Width and height are derived from the edges.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ClientRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ClientRect {
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Rectangle of `width x height` placed at `(left, top)`.
    #[inline]
    pub const fn from_origin_size(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            right: left + width as i32,
            bottom: top + height as i32,
        }
    }

    /// Width in pixels; zero when the edges are inverted.
    #[inline]
    pub const fn width(self) -> u32 {
        if self.right > self.left { (self.right - self.left) as u32 } else { 0 }
    }

    /// Height in pixels; zero when the edges are inverted.
    #[inline]
    pub const fn height(self) -> u32 {
        if self.bottom > self.top { (self.bottom - self.top) as u32 } else { 0 }
    }

    #[inline]
    pub const fn size(self) -> (u32, u32) {
        (self.width(), self.height())
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_from_edges() {
        let r = ClientRect::new(10, 20, 650, 500);
        assert_eq!(r.size(), (640, 480));
        assert!(!r.is_empty());
    }

    #[test]
    fn from_origin_size_matches_edges() {
        let r = ClientRect::from_origin_size(-5, 7, 4, 3);
        assert_eq!(r, ClientRect::new(-5, 7, -1, 10));
        assert_eq!(r.size(), (4, 3));
    }

    #[test]
    fn inverted_edges_are_empty() {
        let r = ClientRect::new(10, 10, 0, 0);
        assert_eq!(r.size(), (0, 0));
        assert!(r.is_empty());
    }

    #[test]
    fn zero_height_is_empty() {
        assert!(ClientRect::new(0, 0, 100, 0).is_empty());
    }
}
