use crate::{
    foundation::{
        core::{Canvas, Point},
        math::{add_sat_u8, mul_div255_u16},
    },
    render::surface::Surface,
};

pub type PremulRgba8 = [u8; 4];

/// A composed frame ready for presentation.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// A frame cleared to one premultiplied color.
    pub fn cleared(canvas: Canvas, premul: PremulRgba8) -> Self {
        let len = canvas.width as usize * canvas.height as usize;
        let mut data = Vec::with_capacity(len * 4);
        for _ in 0..len {
            data.extend_from_slice(&premul);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: true,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Straight-alpha copy of the pixel data, for encoders that expect it.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u16(u16::from(dst[3]), inv));
    for i in 0..3 {
        let dc = mul_div255_u16(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(u16::from(src[i]), dc);
    }
    out
}

/// Source-over `src` onto `frame` with its top-left corner at `origin`, clipped to the frame.
pub fn blit_over(frame: &mut FrameRGBA, src: &Surface, origin: Point) {
    if src.is_empty() {
        return;
    }
    let ox = origin.x.floor() as i64;
    let oy = origin.y.floor() as i64;
    let fw = i64::from(frame.width);
    let fh = i64::from(frame.height);

    let x_start = ox.max(0);
    let y_start = oy.max(0);
    let x_end = (ox + i64::from(src.width())).min(fw);
    let y_end = (oy + i64::from(src.height())).min(fh);
    if x_start >= x_end || y_start >= y_end {
        return;
    }

    let src_bytes = src.as_bytes();
    let src_stride = src.width() as usize * 4;
    let dst_stride = frame.width as usize * 4;
    for y in y_start..y_end {
        let sy = (y - oy) as usize;
        for x in x_start..x_end {
            let sx = (x - ox) as usize;
            let si = sy * src_stride + sx * 4;
            let di = y as usize * dst_stride + x as usize * 4;
            let s = [
                src_bytes[si],
                src_bytes[si + 1],
                src_bytes[si + 2],
                src_bytes[si + 3],
            ];
            let d = &mut frame.data[di..di + 4];
            let out = over([d[0], d[1], d[2], d[3]], s);
            d.copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
