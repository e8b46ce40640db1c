// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour helpers — external border extraction, size filtering, convex hull
// masks, and mask application.

use image::{GrayImage, Luma};
use imageproc::contours::{BorderType, Contour, find_contours};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::geometry::convex_hull;
use imageproc::point::Point;
use scanprep_core::{BoundingRect, ImageDimensions};

/// Outermost borders of the foreground regions of `binary`.
///
/// Holes and any regions nested inside holes are dropped.
pub fn external_contours(binary: &GrayImage) -> Vec<Contour<i32>> {
    find_contours::<i32>(binary)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .collect()
}

/// Bounding box of a contour's points.
pub fn bounding_rect(contour: &Contour<i32>) -> Option<BoundingRect> {
    BoundingRect::from_points(contour.points.iter().map(|p| (p.x, p.y)))
}

/// Keep the contours whose bounding box is at least `min_width` x
/// `min_height`, paired with that box.
pub fn filter_by_size(
    contours: Vec<Contour<i32>>,
    min_width: u32,
    min_height: u32,
) -> Vec<(Contour<i32>, BoundingRect)> {
    contours
        .into_iter()
        .filter_map(|contour| {
            let rect = bounding_rect(&contour)?;
            rect.is_at_least(min_width, min_height)
                .then_some((contour, rect))
        })
        .collect()
}

/// Convex hull of every point of every contour.
pub fn merged_hull<'a, I>(contours: I) -> Vec<Point<i32>>
where
    I: IntoIterator<Item = &'a Contour<i32>>,
{
    let points: Vec<Point<i32>> = contours
        .into_iter()
        .flat_map(|c| c.points.iter().copied())
        .collect();
    if points.is_empty() {
        return points;
    }
    convex_hull(points.as_slice())
}

/// A zero canvas of `dims` with the polygon `hull` filled with 255,
/// boundary included.
pub fn fill_hull(dims: ImageDimensions, hull: &[Point<i32>]) -> GrayImage {
    let mut mask = GrayImage::new(dims.width, dims.height);
    let white = Luma([255u8]);

    // Polygon filling needs a non-degenerate ring; one- and two-point hulls
    // are drawn as their outline only.
    if hull.len() >= 3 {
        draw_polygon_mut(&mut mask, hull, white);
    }
    for (i, start) in hull.iter().enumerate() {
        let end = hull[(i + 1) % hull.len()];
        draw_line_segment_mut(
            &mut mask,
            (start.x as f32, start.y as f32),
            (end.x as f32, end.y as f32),
            white,
        );
    }
    mask
}

/// Keep the pixels of `image` where `mask` is non-zero; zero elsewhere.
pub fn apply_mask(image: &GrayImage, mask: &GrayImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let inside = mask
            .get_pixel_checked(x, y)
            .is_some_and(|m| m.0[0] != 0);
        if inside {
            *image.get_pixel(x, y)
        } else {
            Luma([0u8])
        }
    })
}
