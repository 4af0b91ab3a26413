use glam::Vec2;
use snowfield_platform::{Result, Rgba8, Surface, SurfaceSize};

/// Software framebuffer holding premultiplied RGBA8, cleared to transparent.
pub struct PixelSurface {
    size: SurfaceSize,
    pixels: Vec<Rgba8>,
}

impl PixelSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            pixels: vec![Rgba8::TRANSPARENT; size.area()],
        }
    }

    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.size.width as usize + x as usize)
            .copied()
    }

    /// Raw premultiplied bytes, row-major, for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<()> {
        self.size = size;
        self.pixels.clear();
        self.pixels.resize(size.area(), Rgba8::TRANSPARENT);
        Ok(())
    }

    fn clear(&mut self) {
        self.pixels.fill(Rgba8::TRANSPARENT);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba8) {
        if radius.is_nan() || radius <= 0.0 || color.a == 0 || self.size.area() == 0 {
            return;
        }
        let (width, height) = (self.size.width as i64, self.size.height as i64);
        // Coverage ramps from 1 to 0 over the last pixel of the edge.
        let reach = radius + 0.5;
        let min_x = (center.x - reach).floor().max(0.0) as i64;
        let min_y = (center.y - reach).floor().max(0.0) as i64;
        let max_x = ((center.x + reach).ceil() as i64).min(width - 1);
        let max_y = ((center.y + reach).ceil() as i64).min(height - 1);
        let base_alpha = color.a as f32 / 255.0;

        for y in min_y..=max_y {
            let row = y as usize * width as usize;
            for x in min_x..=max_x {
                let offset = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                let coverage = (reach - offset.length()).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let alpha = base_alpha * coverage;
                let src = Rgba8::new(
                    premultiply(color.r, alpha),
                    premultiply(color.g, alpha),
                    premultiply(color.b, alpha),
                    premultiply(255, alpha),
                );
                let dst = &mut self.pixels[row + x as usize];
                *dst = Rgba8::new(
                    screen(src.r, dst.r),
                    screen(src.g, dst.g),
                    screen(src.b, dst.b),
                    screen(src.a, dst.a),
                );
            }
        }
    }
}

fn premultiply(channel: u8, alpha: f32) -> u8 {
    (channel as f32 * alpha).round().clamp(0.0, 255.0) as u8
}

/// Screen blend on premultiplied channels: `s + d - s*d`. Never darker than `d`.
fn screen(src: u8, dst: u8) -> u8 {
    let (s, d) = (src as u32, dst as u32);
    (s + d - (s * d + 127) / 255).min(255) as u8
}
