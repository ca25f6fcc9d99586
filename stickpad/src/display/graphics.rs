use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;

/// Draw marquee text in the large ASCII font, `position` is the left end of the baseline.
pub fn draw_marquee_text<T>(target: &mut T, text: &str, position: (i32, i32)) -> Result<Point, T::Error>
where
    T: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
    Text::new(text, Point::new(position.0, position.1), style).draw(target)
}
