//! Marquee sink for SSD1306 OLED panels driven in async buffered graphics mode
use display_interface::{AsyncWriteOnlyDataCommand, DisplayError};
use ssd1306::Ssd1306Async;
use ssd1306::mode::BufferedGraphicsModeAsync;
use ssd1306::size::DisplaySizeAsync;

use super::DisplaySink;
use super::graphics::draw_marquee_text;

impl<DI, SIZE> DisplaySink for Ssd1306Async<DI, SIZE, BufferedGraphicsModeAsync<SIZE>>
where
    DI: AsyncWriteOnlyDataCommand,
    SIZE: DisplaySizeAsync,
{
    type Error = DisplayError;

    async fn clear(&mut self) -> Result<(), Self::Error> {
        self.clear_buffer();
        Ok(())
    }

    async fn draw_text(&mut self, text: &str, position: (i32, i32)) -> Result<(), Self::Error> {
        draw_marquee_text(self, text, position).map(|_| ())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ssd1306Async::flush(self).await
    }
}
