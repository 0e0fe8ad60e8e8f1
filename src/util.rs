/// Largest rectangle with the image's aspect ratio that fits the container,
/// centered on the axis with slack. Returns `(x, y, width, height)`.
pub fn fit_centered(
    container: (f32, f32),
    image: (usize, usize),
) -> Option<(f32, f32, f32, f32)> {
    let (container_w, container_h) = container;
    let (image_w, image_h) = (image.0 as f32, image.1 as f32);
    if image_w <= 0.0 || image_h <= 0.0 || container_w <= 0.0 || container_h <= 0.0 {
        return None;
    }

    let width_at_full_height = container_h * image_w / image_h;
    if container_w >= width_at_full_height {
        let x = (container_w - width_at_full_height) / 2.0;
        Some((x, 0.0, width_at_full_height, container_h))
    } else {
        let height = container_w * image_h / image_w;
        let y = (container_h - height) / 2.0;
        Some((0.0, y, container_w, height))
    }
}
