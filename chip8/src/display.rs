use anyhow::Error;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use vip8::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vip8::state::FrameBuffer;

/// Default window pixels per Chip-8 pixel.
pub const SCALE: u32 = 10;

/// Bytes per pixel of an RGB24 texture.
const RGB: usize = 3;

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Opens a window bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> anyhow::Result<Self> {
        let video_subsystem = sdl.video().map_err(Error::msg)?;
        let window = video_subsystem
            .window(
                "vip8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()?;
        let canvas = window.into_canvas().build()?;

        Ok(Display { canvas })
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 RGB24 texture.
    ///
    /// An SDL2 texture is a 1D array of bytes that represent concatenated rows of RGB pixels,
    /// so each on/off pixel becomes three bytes of full or zero intensity.
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flatten()
            .flat_map(|&pixel| [pixel * 0xFF; RGB])
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    pub fn render(&mut self, frame: &FrameBuffer) -> anyhow::Result<()> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator.create_texture_streaming(
            PixelFormatEnum::RGB24,
            DISPLAY_WIDTH as u32,
            DISPLAY_HEIGHT as u32,
        )?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture
            .update(None, &pixels, DISPLAY_WIDTH * RGB)
            .map_err(Error::msg)?;

        self.canvas.copy(&texture, None, None).map_err(Error::msg)?;
        self.canvas.present();
        Ok(())
    }
}
