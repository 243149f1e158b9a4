//! A point-mass traveller that follows a mesh-derived path, plus the
//! distance-based operations that shrink or clamp that path.

use crate::geometry::{FloatCircle, Vector2f, ray_circle_intersect_nearest};
use crate::mesh::{NavMesh, Path};

/// A pathfinding unit bound to a [`NavMesh`] it does not own — the mesh must
/// outlive every agent built against it.
pub struct Agent<'a> {
    mesh: &'a NavMesh,
    position: Vector2f,
    speed: f32,
    path: Path,
    path_index: usize,
    path_prog: f32,
    override_stop: bool,
}

impl<'a> Agent<'a> {
    pub fn new(mesh: &'a NavMesh, position: Vector2f) -> Self {
        Self {
            mesh,
            position,
            speed: 1.0,
            path: Vec::new(),
            path_index: 0,
            path_prog: 0.0,
            override_stop: false,
        }
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Assigns `pos` and clears the path if `pos` lies on the mesh (within a
    /// 0.05 error tolerance). Leaves state untouched and returns `false`
    /// otherwise.
    pub fn set_position(&mut self, pos: Vector2f) -> bool {
        if self.mesh.get_triangle(pos, 0.05).is_none() {
            return false;
        }
        self.position = pos;
        self.path.clear();
        self.path_index = 0;
        self.path_prog = 0.0;
        true
    }

    pub fn position(&self) -> Vector2f {
        self.position
    }

    /// Pathfinds from the current position to `goal` and, if a path was
    /// found, replaces the active path wholesale. Leaves state untouched and
    /// returns `false` if no path exists.
    pub fn set_target_position(&mut self, goal: Vector2f) -> bool {
        let path = self.mesh.pathfind(self.position, goal);
        if path.is_empty() {
            return false;
        }
        self.path = path;
        self.path_index = 0;
        self.path_prog = 0.0;
        true
    }

    /// The path's destination, or the current position if there is no path.
    pub fn target_position(&self) -> Vector2f {
        self.path.last().copied().unwrap_or(self.position)
    }

    pub fn active_path(&self) -> &[Vector2f] {
        &self.path
    }

    pub fn active_path_length(&self) -> f32 {
        self.path
            .windows(2)
            .map(|w| (w[0] - w[1]).length())
            .sum()
    }

    pub fn current_index(&self) -> usize {
        self.path_index
    }

    pub fn inverse_index(&self) -> usize {
        if self.path.is_empty() {
            return 0;
        }
        self.path.len() - 1 - self.path_index
    }

    /// `false` if there is no path, the agent is already at the last vertex,
    /// or the agent is paused.
    pub fn is_moving(&self) -> bool {
        !(self.path.is_empty()
            || self.path_index == self.path.len() - 1
            || self.override_stop)
    }

    /// Stops motion without discarding the path; `start` resumes it.
    pub fn pause(&mut self) {
        self.override_stop = true;
    }

    /// Stops motion and discards the path and progress.
    pub fn stop(&mut self) {
        self.override_stop = true;
        self.path.clear();
        self.path_index = 0;
        self.path_prog = 0.0;
    }

    pub fn start(&mut self) {
        self.override_stop = false;
    }

    /// Advances the agent one tick along its active path.
    ///
    /// `speed` is in units per 60 Hz frame, not per second — `update`
    /// multiplies `speed * dt` by 60 to convert. If a tick's step would carry
    /// past the next waypoint, the remainder continues along the same
    /// direction rather than stalling at the vertex, so a large `dt` doesn't
    /// get stuck re-approaching every corner one frame at a time.
    pub fn update(&mut self, dt: f32) {
        if !self.is_moving() {
            return;
        }

        if self.path[self.path_index + 1] == self.position {
            self.path_index += 1;
            if self.path_index == self.path.len() - 1 {
                return;
            }
        }

        let diff = self.path[self.path_index + 1] - self.position;
        let dist = diff.length();
        let step = self.speed * dt * 60.0;

        if step >= dist {
            self.path_index += 1;
            self.position = self.path[self.path_index];
            let dir = diff * (1.0 / dist);
            self.position = self.position + dir * (step - dist);
        } else {
            let dir = diff * (1.0 / dist);
            self.position = self.position + dir * step;
        }
    }

    /// Shrinks the path from the *end*: pops vertices that lie within `dist`
    /// of the destination, then shortens the final remaining segment so its
    /// endpoint sits exactly `dist` away. No-op if `dist == 0` or the path is
    /// empty.
    pub fn trim_path_radial(&mut self, dist: f32) {
        if dist == 0.0 || self.path.is_empty() {
            return;
        }
        let last = *self.path.last().unwrap();

        loop {
            let i = self.path.len() - 1;
            if i == 0 {
                return;
            }
            let d1 = (self.path[i] - last).length_squared();
            if d1 <= dist * dist {
                let d2 = (self.path[i - 1] - last).length_squared();
                if d2 <= dist * dist {
                    self.path.pop();
                    if self.path.is_empty() {
                        return;
                    }
                    continue;
                }
                let pos = self.path[i - 1];
                let dir = (self.path[i] - self.path[i - 1]).normalise();
                let circle = FloatCircle { pos: last, radius: dist };
                let t = ray_circle_intersect_nearest(pos, dir, circle).unwrap();
                self.path[i] = pos + dir * t;
                return;
            } else {
                return;
            }
        }
    }

    /// Walks the path backwards accumulating segment lengths, popping
    /// vertices while the accumulated length is strictly less than `dist`.
    /// Unlike [`Agent::trim_path_radial`], the final segment is not
    /// shortened — this stops at the last whole vertex past the threshold.
    pub fn trim_path_walked(&mut self, dist: f32) {
        if dist == 0.0 || self.path.is_empty() {
            return;
        }
        let mut total = 0.0;
        let mut i = self.path.len() as isize - 2;
        while i >= 0 {
            let idx = i as usize;
            total += (self.path[idx] - self.path[idx + 1]).length();
            if total < dist {
                self.path.pop();
                i -= 1;
            } else {
                break;
            }
        }
    }

    /// Walks forward accumulating segment lengths and truncates the path so
    /// its final vertex lies exactly `dist` along it from `path[0]`. No-op if
    /// the total length is already `<= dist`; clears the path if the first
    /// segment alone exceeds `dist`.
    pub fn clamp_path_walked(&mut self, dist: f32) {
        if self.path.is_empty() {
            return;
        }
        let mut total = 0.0;
        let mut count = 1usize;
        let mut step = 0.0;
        let mut i = 0;
        while i < self.path.len() - 1 && total < dist {
            step = (self.path[i + 1] - self.path[i]).length();
            total += step;
            count += 1;
            i += 1;
        }
        if total <= dist {
            return;
        }
        if count < 2 {
            self.path.clear();
            return;
        }
        self.path.truncate(count);
        let pos = self.path[self.path.len() - 2];
        let dir = (self.path[self.path.len() - 1] - pos).normalise();
        let last = self.path.len() - 1;
        self.path[last] = pos + dir * (step - (total - dist));
    }

    /// Intended as the dual of [`Agent::trim_path_radial`] anchored at
    /// `path.front()` — but the source this was distilled from flags its own
    /// implementation as broken (`printf("BROKEN; FIX OR DONT USE\n")`
    /// followed by an unconditional throw), and its logic has not been
    /// re-derived. Left unimplemented on purpose; see spec's design notes.
    pub fn clamp_path_radial(&mut self, _dist: f32) {
        unimplemented!("clamp_path_radial is known-broken in the source this was distilled from")
    }
}
