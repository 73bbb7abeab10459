use crate::{error::RenderError, image::Image};

/// Clip pixel coordinates and their payloads to the viewport.
///
/// A coordinate `(u, v)` is inside when `0 <= u < height` and `0 <= v < width`.
///
/// # Returns
///
/// The kept coordinates, the kept payloads and a mask of length `uv.len()`.
pub fn clip_to_viewport<T: Copy>(
    uv: &[[i64; 2]],
    tex: &[T],
    width: usize,
    height: usize,
) -> (Vec<[i64; 2]>, Vec<T>, Vec<bool>) {
    let mask = uv
        .iter()
        .map(|&[u, v]| u >= 0 && v >= 0 && u < height as i64 && v < width as i64)
        .collect::<Vec<_>>();

    let (uv, tex): (Vec<_>, Vec<_>) = uv
        .iter()
        .zip(tex.iter())
        .zip(mask.iter())
        .filter_map(|((p, t), &keep)| keep.then_some((*p, *t)))
        .unzip();

    (uv, tex, mask)
}

/// Draws a line on an image inplace using a standard Bresenham's line algorithm.
///
/// Endpoints may lie anywhere; the segment is first clipped to the canvas grown by
/// the brush size, so only pixels that can touch the image are visited.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The start point of the line as `(u, v)`.
/// * `p1` - The end point of the line as `(u, v)`.
/// * `color` - The color of the line.
/// * `thickness` - The thickness of the line, drawn with a square brush.
pub fn draw_line(img: &mut Image, p0: (i64, i64), p1: (i64, i64), color: [u8; 3], thickness: usize) {
    let half = if thickness > 1 { thickness as i64 / 2 } else { 0 };

    let margin = half.saturating_add(1);
    let lo = [-margin, -margin];
    let hi = [
        (img.rows() as i64).saturating_add(margin),
        (img.cols() as i64).saturating_add(margin),
    ];
    let Some(((mut u0, mut v0), (u1, v1))) = clip_segment(p0, p1, lo, hi) else {
        return;
    };

    let du = (u1 - u0).abs();
    let dv = (v1 - v0).abs();
    let su = if u0 < u1 { 1 } else { -1 };
    let sv = if v0 < v1 { 1 } else { -1 };

    let mut err = du - dv;

    loop {
        for i in -half..=half {
            for j in -half..=half {
                img.put_pixel(u0 + i, v0 + j, color);
            }
        }

        if u0 == u1 && v0 == v1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dv {
            err -= dv;
            u0 += su;
        }
        if e2 < du {
            err += du;
            v0 += sv;
        }
    }
}

// Liang-Barsky clipping of a segment to the box [lo, hi] (inclusive).
// Segments already inside are returned unchanged.
fn clip_segment(
    p0: (i64, i64),
    p1: (i64, i64),
    lo: [i64; 2],
    hi: [i64; 2],
) -> Option<((i64, i64), (i64, i64))> {
    let inside = |(u, v): (i64, i64)| u >= lo[0] && u <= hi[0] && v >= lo[1] && v <= hi[1];
    if inside(p0) && inside(p1) {
        return Some((p0, p1));
    }

    let start = [p0.0 as f64, p0.1 as f64];
    let delta = [p1.0 as f64 - start[0], p1.1 as f64 - start[1]];
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    for axis in 0..2 {
        let (lo, hi) = (lo[axis] as f64, hi[axis] as f64);
        for (p, q) in [(-delta[axis], start[axis] - lo), (delta[axis], hi - start[axis])] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }

    // rounding may nudge a clipped point just outside the box
    let at = |t: f64| {
        let point = |axis: usize| {
            (start[axis] + t * delta[axis])
                .round()
                .clamp(lo[axis] as f64, hi[axis] as f64) as i64
        };
        (point(0), point(1))
    };
    Some((at(t0), at(t1)))
}

/// Draws the edges of a polygon on an image inplace.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `vertices` - The polygon vertices as `(u, v)`.
/// * `edges` - Pairs of vertex indices forming an edge.
/// * `colors` - One color per edge.
/// * `thickness` - The thickness of the edges.
///
/// # Errors
///
/// Fails without drawing anything if `edges` and `colors` differ in length or an
/// edge references a vertex that does not exist.
pub fn draw_polygon(
    img: &mut Image,
    vertices: &[(i64, i64)],
    edges: &[[usize; 2]],
    colors: &[[u8; 3]],
    thickness: usize,
) -> Result<(), RenderError> {
    if edges.len() != colors.len() {
        return Err(RenderError::EdgeColorMismatch(edges.len(), colors.len()));
    }
    if let Some(&index) = edges.iter().flatten().find(|&&i| i >= vertices.len()) {
        return Err(RenderError::VertexOutOfRange {
            index,
            num_vertices: vertices.len(),
        });
    }

    for (&[a, b], &color) in edges.iter().zip(colors.iter()) {
        draw_line(img, vertices[a], vertices[b], color, thickness);
    }
    Ok(())
}

/// Draws filled circles (square splats) on an image inplace.
///
/// Each center covers a `radius x radius` neighborhood. With `antialias`, the color
/// of every covered pixel is attenuated by a unit Gaussian centered on the splat.
/// Where splats overlap, each channel keeps its maximum value; covered pixels are
/// overwritten, uncovered pixels are untouched.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `centers` - The circle centers as `(u, v)` in (sub)pixel coordinates.
/// * `colors` - One color per center.
/// * `radius` - Side of the covered neighborhood in pixels.
/// * `antialias` - Whether to apply the Gaussian falloff.
pub fn draw_circles(
    img: &mut Image,
    centers: &[[f64; 2]],
    colors: &[[u8; 3]],
    radius: usize,
    antialias: bool,
) {
    let (rows, cols) = (img.rows(), img.cols());
    let mut splats: Vec<Option<[f32; 3]>> = vec![None; rows * cols];

    let half = radius as i64 / 2;
    let reach = radius as f64 + 1.0;
    for (center, color) in centers.iter().zip(colors.iter()) {
        // NaN centers fail these comparisons too
        if !(center[0] > -reach
            && center[0] < rows as f64 + reach
            && center[1] > -reach
            && center[1] < cols as f64 + reach)
        {
            continue;
        }
        let (cu, cv) = (center[0].round() as i64, center[1].round() as i64);
        for du in 0..radius as i64 {
            for dv in 0..radius as i64 {
                let (u, v) = (cu + du - half, cv + dv - half);
                if u < 0 || v < 0 || u >= rows as i64 || v >= cols as i64 {
                    continue;
                }
                let alpha = if antialias {
                    let (eu, ev) = (u as f64 - center[0], v as f64 - center[1]);
                    (-0.5 * (eu * eu + ev * ev)).exp() as f32
                } else {
                    1.0
                };
                let tex = color.map(|c| c as f32 * alpha);
                let slot = &mut splats[u as usize * cols + v as usize];
                *slot = Some(match *slot {
                    Some(prev) => std::array::from_fn(|c| prev[c].max(tex[c])),
                    None => tex,
                });
            }
        }
    }

    for (i, splat) in splats.into_iter().enumerate() {
        if let Some(tex) = splat {
            let color = tex.map(|c| c.round().clamp(0.0, 255.0) as u8);
            img.put_pixel((i / cols) as i64, (i % cols) as i64, color);
        }
    }
}
