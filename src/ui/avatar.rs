//! Circular avatar: the user's image, or an initials disc.

use eframe::egui::{self, load::SizedTexture, Align2, Color32, FontId, ImageSource};

use super::style::{AvatarContent, Paint};
use crate::model::ImageRef;

/// Convert a host image reference into something egui can draw at `size`.
pub(crate) fn image_source(image: &ImageRef, size: egui::Vec2) -> ImageSource<'static> {
    match image {
        ImageRef::Uri(uri) => ImageSource::Uri(uri.clone().into()),
        ImageRef::Texture(id) => ImageSource::Texture(SizedTexture::new(*id, size)),
    }
}

/// Render an avatar of diameter `size`.
///
/// Images are clipped to a circle; the disc behind them uses `paint.fill`
/// so transparent or still-loading images keep the avatar's footprint.
pub fn render_avatar(
    ui: &mut egui::Ui,
    content: &AvatarContent,
    paint: Paint,
    size: f32,
    font_size: f32,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    if !ui.is_rect_visible(rect) {
        return response;
    }

    let painter = ui.painter();
    let radius = size / 2.0;

    // Elevation
    painter.circle_filled(
        rect.center() + egui::vec2(0.0, 1.0),
        radius,
        Color32::from_black_alpha(25),
    );
    painter.circle_filled(rect.center(), radius, paint.fill);

    match content {
        AvatarContent::Image(image) => {
            egui::Image::new(image_source(image, rect.size()))
                .corner_radius(radius)
                .paint_at(ui, rect);
        }
        AvatarContent::Initials(label) => {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                label,
                FontId::proportional(font_size),
                paint.text,
            );
        }
    }

    response
}
