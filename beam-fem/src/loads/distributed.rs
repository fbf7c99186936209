//! Distributed (line) loads and their simulation by concentrated loads

use serde::{Deserialize, Serialize};

use super::point_load::ConcentratedLoad;

/// A linearly varying line load between two positions
///
/// Equal intensities give a rectangular load, different intensities a
/// triangular or trapezoidal one. Downward intensities are negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Left end position
    pub left_position: f64,
    /// Right end position, greater than `left_position`
    pub right_position: f64,
    /// Intensity at the left end
    pub left_force: f64,
    /// Intensity at the right end
    pub right_force: f64,
}

/// Equivalent concentrated loads that stand in for one distributed load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedLoad {
    /// The distributed load that was split
    pub source: DistributedLoad,
    /// Number of equal-length segments
    pub segments: usize,
    /// Length of each segment
    pub segment_length: f64,
    /// One load per segment, at the segment centroid, moment always zero
    pub loads: Vec<ConcentratedLoad>,
}

impl DistributedLoad {
    /// Create a new distributed load
    pub fn new(left_position: f64, right_position: f64, left_force: f64, right_force: f64) -> Self {
        Self {
            left_position,
            right_position,
            left_force,
            right_force,
        }
    }

    /// Constant intensity `w` between two positions
    pub fn uniform(left_position: f64, right_position: f64, w: f64) -> Self {
        Self::new(left_position, right_position, w, w)
    }

    /// Triangular load, zero at the left end
    pub fn triangular(left_position: f64, right_position: f64, w_max: f64) -> Self {
        Self::new(left_position, right_position, 0.0, w_max)
    }

    pub fn length(&self) -> f64 {
        self.right_position - self.left_position
    }

    pub fn is_rectangle(&self) -> bool {
        self.left_force == self.right_force
    }

    /// Total force carried by the load (area under the intensity line)
    pub fn total_force(&self) -> f64 {
        (self.left_force + self.right_force) / 2.0 * self.length()
    }

    /// Intensities share a sign, or one of them is zero
    pub fn has_consistent_sign(&self) -> bool {
        self.left_force * self.right_force >= 0.0
    }

    /// Number of segments used to simulate this load on a beam of
    /// `beam_length` sampled every `segment_length`
    pub fn segment_count(&self, beam_length: f64, segment_length: f64) -> usize {
        if segment_length == 0.0 {
            return 1;
        }
        let beam_segments = ((beam_length / segment_length).round() as usize).max(1);
        let beam_segment_length = beam_length / beam_segments as f64;
        if beam_segment_length >= self.length() {
            1
        } else {
            ((self.length() / beam_segment_length).round() as usize).max(1)
        }
    }

    /// Split the load into equal segments and replace each segment by a
    /// concentrated load equal to its area, placed at its centroid
    pub fn simulate(&self, beam_length: f64, segment_length: f64) -> SimulatedLoad {
        let segments = self.segment_count(beam_length, segment_length);
        let seg_len = self.length() / segments as f64;
        let mut loads = Vec::with_capacity(segments);

        if self.is_rectangle() {
            let area = self.left_force * self.length() / segments as f64;
            let mut centroid = self.left_position + seg_len / 2.0 - seg_len;
            for _ in 0..segments {
                centroid += seg_len;
                loads.push(ConcentratedLoad::force(centroid, area));
            }
        } else if segments == 1 {
            let (area, centroid) = trapezoid_segment(self.left_force, self.right_force, seg_len);
            loads.push(ConcentratedLoad::force(self.left_position + centroid, area));
        } else {
            let slope = (self.right_force - self.left_force) / self.length();
            let mut seg_left = self.left_position - seg_len;
            let mut right_pos = self.left_position;
            let mut right_force = self.left_force;
            for _ in 0..segments {
                let left_force = right_force;
                right_pos += seg_len;
                right_force = slope * (right_pos - self.left_position) + self.left_force;
                let (area, centroid) = trapezoid_segment(left_force, right_force, seg_len);
                seg_left += seg_len;
                loads.push(ConcentratedLoad::force(seg_left + centroid, area));
            }
        }

        SimulatedLoad {
            source: *self,
            segments,
            segment_length: seg_len,
            loads,
        }
    }
}

/// Area and centroid (from the segment's left end) of one trapezoidal segment
fn trapezoid_segment(left_force: f64, right_force: f64, length: f64) -> (f64, f64) {
    let height = triangle_height(left_force, right_force);
    if left_force.abs() > right_force.abs() {
        rectangle_with_triangle(length, right_force, height, true)
    } else {
        rectangle_with_triangle(length, left_force, height, false)
    }
}

/// Difference of the two intensities, signed like the left intensity.
/// Callers guarantee both intensities share a sign or one is zero.
fn triangle_height(left_force: f64, right_force: f64) -> f64 {
    let height = left_force - right_force;
    if (left_force <= 0.0 && height >= 0.0) || (left_force >= 0.0 && height <= 0.0) {
        -height
    } else {
        height
    }
}

/// Area and centroid of a rectangle with a right triangle stacked on it.
/// `triangle_left` puts the vertical leg of the triangle on the left.
fn rectangle_with_triangle(
    length: f64,
    rect_height: f64,
    tri_height: f64,
    triangle_left: bool,
) -> (f64, f64) {
    let tri_arm = if triangle_left {
        length / 3.0
    } else {
        length * 2.0 / 3.0
    };

    if rect_height == 0.0 {
        return (length * tri_height / 2.0, tri_arm);
    }

    let area_rect = length * rect_height;
    let area_tri = length * tri_height / 2.0;
    let area = area_rect + area_tri;
    let centroid = (area_rect * length / 2.0 + area_tri * tri_arm) / area;
    (area, centroid)
}
