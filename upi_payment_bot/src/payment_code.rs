//! Drawing UPI payment links as QR codes.
use qrcode::{
    render::{svg, unicode},
    QrCode,
};
use upi_payment_engine::helpers::UpiPaymentLink;

use crate::BotError;

const SVG_MIN_SIZE: u32 = 240;

fn qr_code(link: &UpiPaymentLink) -> Result<QrCode, BotError> {
    QrCode::new(link.to_uri()).map_err(|e| BotError::PaymentCodeError(e.to_string()))
}

/// Renders the payment link as text, two modules per character, for terminals.
pub fn render_unicode(link: &UpiPaymentLink) -> Result<String, BotError> {
    let code = qr_code(link)?
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Dark)
        .light_color(unicode::Dense1x2::Light)
        .quiet_zone(true)
        .build();
    Ok(code)
}

/// Renders the payment link as an SVG document, for transports that send images.
pub fn render_svg(link: &UpiPaymentLink) -> Result<String, BotError> {
    let image = qr_code(link)?
        .render::<svg::Color<'_>>()
        .min_dimensions(SVG_MIN_SIZE, SVG_MIN_SIZE)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();
    Ok(image)
}

#[cfg(test)]
mod test {
    use upg_common::Paise;
    use upi_payment_engine::db_types::OrderId;

    use super::*;

    fn link() -> UpiPaymentLink {
        UpiPaymentLink::for_order("merchant@paytm", "Merchant", &OrderId::from("ORDER_42_1700000000"), Paise::from(15_000))
    }

    #[test]
    fn unicode_code() {
        let code = render_unicode(&link()).unwrap();
        let lines = code.lines().collect::<Vec<&str>>();
        assert!(lines.len() > 10);
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
        assert!(code.contains('█') || code.contains('▀') || code.contains('▄'));
    }

    #[test]
    fn svg_code() {
        let image = render_svg(&link()).unwrap();
        assert!(image.starts_with("<?xml"));
        assert!(image.contains("<svg"));
        assert!(image.contains("#000000"));
    }
}
