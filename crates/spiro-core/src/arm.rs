//! Kinematic arm tree.
//!
//! Every arm is a rotating vector anchored on its parent arm. Arms live in an
//! arena owned by [`ArmTree`]; children are held as ordered id lists and the
//! parent link is a plain id, so the tree never holds references into itself.
//!
//! Each arm keeps two poses:
//! - the rest pose (`*_initial`), edited interactively and restored by reset
//! - the live pose, advanced by [`ArmTree::rotate`] while animating

use std::collections::HashMap;

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::ArmError;
use crate::geometry;
use crate::trail::Trail;

/// Default head/base radius in pixels.
pub const DEFAULT_RADIUS: f32 = 5.0;

/// Default rotation rate of a newly created arm, relative to its parent.
pub const DEFAULT_REVOLUTIONS_PER_SECOND: f32 = 0.3;

/// Stable identifier of an arm. Ids are never reused within a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArmId(u32);

/// Emphasis level used when drawing an arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Unhighlight,
    LightHighlight,
    Highlight,
}

impl Highlight {
    /// Colour of the direction line and base outline.
    pub const fn line_color(self) -> Color {
        match self {
            Self::Unhighlight => Color::rgb(50, 50, 50),
            Self::LightHighlight => Color::rgb(150, 150, 150),
            Self::Highlight => Color::WHITE,
        }
    }

    /// Alpha applied to the trail colour when drawing the head.
    pub const fn head_alpha(self) -> u8 {
        match self {
            Self::Unhighlight => 63,
            Self::LightHighlight => 127,
            Self::Highlight => 255,
        }
    }
}

/// One arm of the tree.
#[derive(Debug, Clone)]
pub struct ArmNode {
    pub position_initial: Vec2,
    pub position: Vec2,
    pub direction_initial: Vec2,
    pub direction: Vec2,
    /// Signed rotation rate; negative spins the other way.
    pub revolutions_per_second: f32,
    pub is_root: bool,
    parent: Option<ArmId>,
    /// Anchor location as a fraction of the parent's rest direction, in `[0, 1]`.
    position_on_parent: f32,
    children: Vec<ArmId>,
    pub trail_on: bool,
    pub trail: Trail,
    pub head_radius: f32,
    pub base_radius: f32,
}

impl ArmNode {
    /// Creates a detached arm at rest at `position` pointing along `direction`.
    pub fn new(position: Vec2, direction: Vec2) -> Self {
        Self {
            position_initial: position,
            position,
            direction_initial: direction,
            direction,
            revolutions_per_second: DEFAULT_REVOLUTIONS_PER_SECOND,
            is_root: false,
            parent: None,
            position_on_parent: 0.0,
            children: Vec::new(),
            trail_on: false,
            trail: Trail::new(Color::WHITE),
            head_radius: DEFAULT_RADIUS,
            base_radius: DEFAULT_RADIUS,
        }
    }

    pub fn with_revolutions_per_second(mut self, revolutions_per_second: f32) -> Self {
        self.revolutions_per_second = revolutions_per_second;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.head_radius = radius;
        self.base_radius = radius;
        self
    }

    /// Live tip position.
    pub fn tip(&self) -> Vec2 {
        self.position + self.direction
    }

    /// Rest-pose tip position.
    pub fn rest_tip(&self) -> Vec2 {
        self.position_initial + self.direction_initial
    }

    pub fn parent(&self) -> Option<ArmId> {
        self.parent
    }

    pub fn children(&self) -> &[ArmId] {
        &self.children
    }

    pub fn position_on_parent(&self) -> f32 {
        self.position_on_parent
    }

    /// Sets the anchor fraction, clamped to `[0, 1]`.
    pub fn set_position_on_parent(&mut self, value: f32) {
        self.position_on_parent = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
    }

    /// Sets both rest and live direction.
    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction_initial = direction;
        self.direction = direction;
    }

    /// Sets both rest and live anchor position.
    pub fn set_position(&mut self, position: Vec2) {
        self.position_initial = position;
        self.position = position;
    }

    /// Orthogonal projection of `cursor - position_initial` onto the rest direction.
    pub fn cursor_orthogonal_projection(&self, cursor: Vec2) -> Vec2 {
        geometry::orthogonal_projection(cursor, self.position_initial, self.direction_initial)
    }

    /// Projection onto the rest direction segment, clamped to its endpoints.
    pub fn clamped_projection(&self, cursor: Vec2) -> (f32, Vec2) {
        geometry::clamped_projection(cursor, self.position_initial, self.direction_initial)
    }

    pub fn draw_direction(&self, canvas: &mut impl Canvas, highlight: Highlight) {
        if self.is_root {
            return;
        }
        canvas.draw_line(highlight.line_color(), self.position, self.tip());
    }

    pub fn draw_head(&self, canvas: &mut impl Canvas, highlight: Highlight, background: Color) {
        if self.is_root {
            return;
        }
        let color = self.trail.color.with_alpha(highlight.head_alpha());
        if self.trail_on {
            canvas.fill_circle(color, self.tip(), self.head_radius);
        } else {
            canvas.fill_circle(background, self.tip(), self.head_radius);
            canvas.stroke_circle(color, self.tip(), self.head_radius);
        }
    }

    pub fn draw_base(&self, canvas: &mut impl Canvas, highlight: Highlight, background: Color) {
        if self.is_root {
            return;
        }
        canvas.fill_circle(background, self.position, self.base_radius);
        canvas.stroke_circle(highlight.line_color(), self.position, self.base_radius);
    }
}

/// Closest arm to a point, as found by [`ArmTree::nearest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestArm {
    pub id: ArmId,
    /// Clamped projection of the point onto the arm, relative to its rest anchor.
    pub offset: Vec2,
    pub distance_squared: f32,
}

/// Result of removing an arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    /// Number of arms dropped, the removed arm included.
    pub removed: usize,
    /// The root has no arms left.
    pub root_emptied: bool,
}

/// The arm tree: a single root plus every arm attached below it.
#[derive(Debug, Clone)]
pub struct ArmTree {
    nodes: HashMap<ArmId, ArmNode>,
    root: ArmId,
    next_id: u32,
}

impl ArmTree {
    /// Creates a tree holding only a non-rotating root anchored at `position`.
    pub fn new(position: Vec2, direction: Vec2) -> Self {
        let root = ArmId(0);
        let mut node = ArmNode::new(position, direction).with_revolutions_per_second(0.0);
        node.is_root = true;

        let mut nodes = HashMap::new();
        nodes.insert(root, node);
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    pub fn root(&self) -> ArmId {
        self.root
    }

    pub fn root_node(&self) -> &ArmNode {
        &self.nodes[&self.root]
    }

    /// Number of arms, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root has no arms attached.
    pub fn is_empty(&self) -> bool {
        self.root_node().children.is_empty()
    }

    pub fn contains(&self, id: ArmId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: ArmId) -> Option<&ArmNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: ArmId) -> Option<&mut ArmNode> {
        self.nodes.get_mut(&id)
    }

    pub fn node(&self, id: ArmId) -> Result<&ArmNode, ArmError> {
        self.nodes.get(&id).ok_or(ArmError::UnknownArm(id))
    }

    pub fn node_mut(&mut self, id: ArmId) -> Result<&mut ArmNode, ArmError> {
        self.nodes.get_mut(&id).ok_or(ArmError::UnknownArm(id))
    }

    /// Ids of `from` and all its descendants, each parent before its children.
    pub fn preorder(&self, from: ArmId) -> Vec<ArmId> {
        let mut order = Vec::new();
        self.walk(from, &mut |id, _| order.push(id));
        order
    }

    /// Ids of `from` and all its descendants, each child before its parent.
    pub fn postorder(&self, from: ArmId) -> Vec<ArmId> {
        let mut order = Vec::new();
        self.collect_postorder(from, &mut order);
        order
    }

    fn collect_postorder(&self, id: ArmId, order: &mut Vec<ArmId>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        for &child in &node.children {
            self.collect_postorder(child, order);
        }
        order.push(id);
    }

    /// Visits `from` and its descendants in pre-order.
    pub fn walk(&self, from: ArmId, visit: &mut impl FnMut(ArmId, &ArmNode)) {
        let Some(node) = self.nodes.get(&from) else {
            return;
        };
        visit(from, node);
        for &child in &node.children {
            self.walk(child, visit);
        }
    }

    /// Attaches `node` below `parent` and returns its id.
    ///
    /// The anchor fraction is read off the node's rest position along the
    /// parent's rest direction, and the node's rate is made relative to the
    /// parent's by adding the parent's rate.
    pub fn add_child(&mut self, parent: ArmId, mut node: ArmNode) -> Result<ArmId, ArmError> {
        let parent_node = self.node(parent)?;
        let offset = node.position_initial - parent_node.position_initial;
        let ratio = match geometry::axis_ratio(offset, parent_node.direction_initial) {
            Ok(ratio) => ratio,
            Err(err) => {
                tracing::warn!("[arm] attaching to {parent:?}: {err}, anchoring at its base");
                0.0
            }
        };
        let parent_rate = parent_node.revolutions_per_second;

        let id = ArmId(self.next_id);
        self.next_id += 1;

        node.is_root = false;
        node.parent = Some(parent);
        node.children.clear();
        node.set_position_on_parent(ratio);
        node.revolutions_per_second += parent_rate;

        self.nodes.insert(id, node);
        self.node_mut(parent)?.children.push(id);

        tracing::debug!("[arm] attached {id:?} to {parent:?}");
        Ok(id)
    }

    /// Detaches `child` from `parent` and drops its whole subtree.
    pub fn remove_child(&mut self, parent: ArmId, child: ArmId) -> Result<Removal, ArmError> {
        if child == self.root {
            return Err(ArmError::RootImmutable);
        }
        if self.node(child)?.parent != Some(parent) {
            return Err(ArmError::UnknownArm(child));
        }

        let siblings = &mut self.node_mut(parent)?.children;
        siblings.retain(|&id| id != child);

        let removed = self.drop_subtree(child);
        tracing::debug!("[arm] removed {child:?} from {parent:?} ({removed} arms)");

        Ok(Removal {
            removed,
            root_emptied: parent == self.root && self.is_empty(),
        })
    }

    /// Detaches `id` from its parent and drops its subtree.
    pub fn remove(&mut self, id: ArmId) -> Result<Removal, ArmError> {
        let parent = self.node(id)?.parent.ok_or(ArmError::RootImmutable)?;
        self.remove_child(parent, id)
    }

    /// Drops every arm below `id`. Returns how many were dropped.
    pub fn clear_children(&mut self, id: ArmId) -> Result<usize, ArmError> {
        let children = std::mem::take(&mut self.node_mut(id)?.children);
        Ok(children.into_iter().map(|child| self.drop_subtree(child)).sum())
    }

    fn drop_subtree(&mut self, id: ArmId) -> usize {
        let ids = self.preorder(id);
        for id in &ids {
            self.nodes.remove(id);
        }
        ids.len()
    }

    /// Advances the whole tree by `dt` seconds.
    pub fn rotate(&mut self, dt: f64, record_trail: bool) {
        self.rotate_subtree(self.root, dt, record_trail);
    }

    /// Advances `from` and its descendants by `dt` seconds.
    ///
    /// Each arm turns its live direction by its own rate, optionally records its
    /// new tip on its trail, then re-anchors its children on its live direction
    /// before they turn.
    pub fn rotate_subtree(&mut self, from: ArmId, dt: f64, record_trail: bool) {
        for id in self.preorder(from) {
            let Some(node) = self.nodes.get_mut(&id) else {
                continue;
            };
            let angle = geometry::rotation_angle(node.revolutions_per_second, dt);
            node.direction = geometry::rotate(node.direction, angle);
            if record_trail {
                let tip = node.tip();
                node.trail.new_point(tip);
            }

            let (position, direction) = (node.position, node.direction);
            let children = node.children.clone();
            for child in children {
                if let Some(child) = self.nodes.get_mut(&child) {
                    child.position = position + direction * child.position_on_parent;
                }
            }
        }
    }

    /// Restores the rest pose of the whole tree and resets every trail.
    pub fn reset(&mut self, canvas: &mut impl Canvas, background: Color) {
        self.reset_subtree(self.root, canvas, background);
    }

    pub fn reset_subtree(&mut self, from: ArmId, canvas: &mut impl Canvas, background: Color) {
        for id in self.preorder(from) {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.position = node.position_initial;
                node.direction = node.direction_initial;
                node.trail.reset(canvas, background);
            }
        }
    }

    /// Seeds every trail with its arm's rest-pose tip.
    pub fn seed_trails(&mut self) {
        for node in self.nodes.values_mut() {
            let tip = node.rest_tip();
            node.trail.seed(tip);
        }
    }

    /// Re-anchors every descendant of `id` from its anchor fraction and its
    /// parent's current geometry, top-down.
    pub fn update_childrens_position_on_parent(&mut self, id: ArmId) -> Result<(), ArmError> {
        self.node(id)?;
        for parent in self.preorder(id) {
            let Some(node) = self.nodes.get(&parent) else {
                continue;
            };
            let (position, direction) = (node.position, node.direction);
            let children = node.children.clone();
            for child in children {
                if let Some(child) = self.nodes.get_mut(&child) {
                    child.set_position(position + direction * child.position_on_parent);
                }
            }
        }
        Ok(())
    }

    /// Slides `id`'s anchor along its parent's rest direction to the clamped
    /// projection of `cursor`, then re-anchors its descendants.
    pub fn slide_on_parent(&mut self, id: ArmId, cursor: Vec2) -> Result<(), ArmError> {
        let parent = self.node(id)?.parent.ok_or(ArmError::RootImmutable)?;
        let parent_node = self.node(parent)?;
        let (scale, offset) = parent_node.clamped_projection(cursor);
        let anchor = parent_node.position_initial + offset;

        let node = self.node_mut(id)?;
        node.set_position(anchor);
        node.set_position_on_parent(scale);
        self.update_childrens_position_on_parent(id)
    }

    /// Sets `id`'s rest and live direction, then re-anchors its descendants.
    pub fn set_direction(&mut self, id: ArmId, direction: Vec2) -> Result<(), ArmError> {
        self.node_mut(id)?.set_direction(direction);
        self.update_childrens_position_on_parent(id)
    }

    /// Arm whose rest segment passes closest to `point`, the root included.
    ///
    /// Ties keep the arm found first in pre-order.
    pub fn nearest(&self, point: Vec2) -> NearestArm {
        let mut best = Self::hit(self.root, self.root_node(), point);
        self.walk(self.root, &mut |id, node| {
            let candidate = Self::hit(id, node, point);
            if candidate.distance_squared < best.distance_squared {
                best = candidate;
            }
        });
        best
    }

    /// Like [`ArmTree::nearest`] but never the root: a root hit falls back to the
    /// root's first arm. `None` when the tree has no arms.
    pub fn nearest_selectable(&self, point: Vec2) -> Option<NearestArm> {
        let nearest = self.nearest(point);
        if nearest.id != self.root {
            return Some(nearest);
        }
        let first = *self.root_node().children.first()?;
        self.get(first).map(|node| Self::hit(first, node, point))
    }

    /// Clamped projection of `point` onto one arm's rest segment.
    pub fn hit_test(&self, id: ArmId, point: Vec2) -> Result<NearestArm, ArmError> {
        Ok(Self::hit(id, self.node(id)?, point))
    }

    fn hit(id: ArmId, node: &ArmNode, point: Vec2) -> NearestArm {
        let (_, offset) = node.clamped_projection(point);
        NearestArm {
            id,
            offset,
            distance_squared: (node.position_initial + offset).distance_squared(point),
        }
    }

    /// Draws every arm's direction and head, children before parents.
    pub fn draw(&self, canvas: &mut impl Canvas, highlight: Highlight, background: Color) {
        for id in self.postorder(self.root) {
            let node = &self.nodes[&id];
            node.draw_direction(canvas, highlight);
            node.draw_head(canvas, highlight, background);
        }
    }

    /// Draws the latest trail segment of every trail-enabled arm.
    pub fn draw_trails(&self, canvas: &mut impl Canvas) {
        self.walk(self.root, &mut |_, node| {
            if node.trail_on {
                node.trail.draw(canvas);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_1_SQRT_2;

    use super::*;
    use crate::canvas::DrawList;

    const EPS: f32 = 1e-3;

    fn tree() -> ArmTree {
        ArmTree::new(Vec2::new(400.0, 300.0), Vec2::new(0.0, 0.1))
    }

    fn assert_close(a: Vec2, b: Vec2) {
        assert!(a.distance(b) < EPS, "{a} != {b}");
    }

    #[test]
    fn test_child_rate_composition() {
        let mut tree = tree();
        let root = tree.root();
        let parent = tree
            .add_child(
                root,
                ArmNode::new(Vec2::new(400.0, 300.0), Vec2::new(100.0, 0.0))
                    .with_revolutions_per_second(0.5),
            )
            .unwrap();
        let child = tree
            .add_child(
                parent,
                ArmNode::new(Vec2::new(500.0, 300.0), Vec2::new(50.0, 0.0))
                    .with_revolutions_per_second(0.2),
            )
            .unwrap();

        assert!((tree.node(parent).unwrap().revolutions_per_second - 0.5).abs() < 1e-6);
        assert!((tree.node(child).unwrap().revolutions_per_second - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_add_child_sets_parent_and_ratio() {
        let mut tree = tree();
        let root = tree.root();
        let parent = tree
            .add_child(root, ArmNode::new(Vec2::new(400.0, 300.0), Vec2::new(100.0, 0.0)))
            .unwrap();
        let child = tree
            .add_child(parent, ArmNode::new(Vec2::new(425.0, 300.0), Vec2::new(0.0, 10.0)))
            .unwrap();

        let node = tree.node(child).unwrap();
        assert_eq!(node.parent(), Some(parent));
        assert!((node.position_on_parent() - 0.25).abs() < 1e-6);
        assert_eq!(tree.node(parent).unwrap().children(), &[child]);
    }

    #[test]
    fn test_position_on_parent_is_clamped() {
        let mut tree = tree();
        let root = tree.root();
        let parent = tree
            .add_child(root, ArmNode::new(Vec2::new(400.0, 300.0), Vec2::new(100.0, 0.0)))
            .unwrap();
        let beyond = tree
            .add_child(parent, ArmNode::new(Vec2::new(700.0, 300.0), Vec2::ONE))
            .unwrap();
        let before = tree
            .add_child(parent, ArmNode::new(Vec2::new(300.0, 300.0), Vec2::ONE))
            .unwrap();

        assert_eq!(tree.node(beyond).unwrap().position_on_parent(), 1.0);
        assert_eq!(tree.node(before).unwrap().position_on_parent(), 0.0);
    }

    #[test]
    fn test_attach_to_degenerate_parent_anchors_at_base() {
        let mut tree = tree();
        let root = tree.root();
        let parent = tree
            .add_child(root, ArmNode::new(Vec2::new(400.0, 300.0), Vec2::ZERO))
            .unwrap();
        let child = tree
            .add_child(parent, ArmNode::new(Vec2::new(410.0, 300.0), Vec2::ONE))
            .unwrap();

        assert_eq!(tree.node(child).unwrap().position_on_parent(), 0.0);
    }

    fn round_trip(direction: Vec2, fraction: f32) {
        let mut tree = tree();
        let root = tree.root();
        let anchor = Vec2::new(100.0, 200.0);
        let parent = tree
            .add_child(root, ArmNode::new(anchor, direction))
            .unwrap();
        let p = anchor + direction * fraction;
        let child = tree
            .add_child(parent, ArmNode::new(p, Vec2::new(5.0, 5.0)))
            .unwrap();

        tree.update_childrens_position_on_parent(parent).unwrap();

        let node = tree.node(child).unwrap();
        assert_close(node.position_initial, p);
        assert_close(node.position, p);
    }

    #[test]
    fn test_position_on_parent_round_trip() {
        round_trip(Vec2::new(80.0, 0.0), 0.4);
        round_trip(Vec2::new(0.0, 80.0), 0.4);
        round_trip(Vec2::new(0.0, -60.0), 0.75);
        round_trip(Vec2::new(50.0, 50.0), 0.3);
        round_trip(Vec2::new(-50.0, 50.0), 0.9);
    }

    #[test]
    fn test_attach_ratio_near_vertical_parent() {
        // Parent direction with a tiny x component: the ratio is read from x,
        // so a child placed halfway along y anchors at the base.
        let mut tree = tree();
        let root = tree.root();
        let anchor = Vec2::new(100.0, 100.0);
        let parent = tree
            .add_child(root, ArmNode::new(anchor, Vec2::new(1e-6, 50.0)))
            .unwrap();
        let child = tree
            .add_child(parent, ArmNode::new(anchor + Vec2::new(0.0, 25.0), Vec2::ONE))
            .unwrap();
        assert_eq!(tree.node(child).unwrap().position_on_parent(), 0.0);

        let vertical = tree
            .add_child(root, ArmNode::new(anchor, Vec2::new(0.0, 50.0)))
            .unwrap();
        let child = tree
            .add_child(vertical, ArmNode::new(anchor + Vec2::new(0.0, 25.0), Vec2::ONE))
            .unwrap();
        assert!((tree.node(child).unwrap().position_on_parent() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_quarter_turn_moves_children() {
        let mut tree = tree();
        let root = tree.root();
        let parent = tree
            .add_child(
                root,
                ArmNode::new(Vec2::new(400.0, 300.0), Vec2::new(100.0, 0.0))
                    .with_revolutions_per_second(0.25),
            )
            .unwrap();
        let child = tree
            .add_child(
                parent,
                ArmNode::new(Vec2::new(500.0, 300.0), Vec2::new(10.0, 0.0))
                    .with_revolutions_per_second(0.0),
            )
            .unwrap();

        tree.rotate(1.0, false);

        let parent_node = tree.node(parent).unwrap();
        assert_close(parent_node.direction, Vec2::new(0.0, 100.0));
        // The child inherits the parent's rate and sits on the parent's tip.
        let child_node = tree.node(child).unwrap();
        assert_close(child_node.position, Vec2::new(400.0, 400.0));
        assert_close(child_node.direction, Vec2::new(0.0, 10.0));
        // Rest pose is untouched.
        assert_close(parent_node.direction_initial, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_rotate_preserves_lengths() {
        let mut tree = tree();
        let root = tree.root();
        let arm = tree
            .add_child(
                root,
                ArmNode::new(Vec2::new(400.0, 300.0), Vec2::new(30.0, 40.0))
                    .with_revolutions_per_second(1.3),
            )
            .unwrap();

        for _ in 0..600 {
            tree.rotate(1.0 / 60.0, false);
        }
        assert!((tree.node(arm).unwrap().direction.length() - 50.0).abs() < 0.05);
    }

    #[test]
    fn test_large_dt_is_not_clamped() {
        let mut tree = tree();
        let root = tree.root();
        let arm = tree
            .add_child(
                root,
                ArmNode::new(Vec2::new(400.0, 300.0), Vec2::new(100.0, 0.0))
                    .with_revolutions_per_second(0.25),
            )
            .unwrap();

        // A 5 s stall is 1.25 turns: one full turn plus a quarter.
        tree.rotate(5.0, false);
        assert_close(tree.node(arm).unwrap().direction, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_rotate_records_trail_only_when_requested() {
        let mut tree = tree();
        let root = tree.root();
        let arm = tree
            .add_child(root, ArmNode::new(Vec2::new(400.0, 300.0), Vec2::new(100.0, 0.0)))
            .unwrap();

        tree.rotate(0.1, false);
        assert_eq!(tree.node(arm).unwrap().trail.length, 0);

        tree.rotate(0.1, true);
        tree.rotate(0.1, true);
        let node = tree.node(arm).unwrap();
        assert_eq!(node.trail.length, 2);
        assert_close(node.trail.current_point, node.tip());
    }

    #[test]
    fn test_reset_idempotent() {
        let mut canvas = DrawList::default();
        let mut tree = tree();
        let root = tree.root();
        let arm = tree
            .add_child(root, ArmNode::new(Vec2::new(400.0, 300.0), Vec2::new(100.0, 0.0)))
            .unwrap();
        tree.add_child(arm, ArmNode::new(Vec2::new(450.0, 300.0), Vec2::new(0.0, 20.0)))
            .unwrap();
        tree.rotate(0.37, true);
        tree.rotate(0.37, true);

        tree.reset(&mut canvas, Color::BLACK);
        let once: Vec<_> = tree
            .preorder(root)
            .into_iter()
            .map(|id| {
                let n = tree.node(id).unwrap();
                (n.position, n.direction, n.trail.length)
            })
            .collect();

        tree.reset(&mut canvas, Color::BLACK);
        let twice: Vec<_> = tree
            .preorder(root)
            .into_iter()
            .map(|id| {
                let n = tree.node(id).unwrap();
                (n.position, n.direction, n.trail.length)
            })
            .collect();

        assert_eq!(once, twice);
        let node = tree.node(arm).unwrap();
        assert_eq!(node.direction, node.direction_initial);
        assert_eq!(node.trail.length, 0);
    }

    fn three_arms() -> (ArmTree, [ArmId; 3]) {
        let mut tree = ArmTree::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.1));
        let root = tree.root();
        let a = tree
            .add_child(root, ArmNode::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)))
            .unwrap();
        let b = tree
            .add_child(root, ArmNode::new(Vec2::new(0.0, 100.0), Vec2::new(100.0, 0.0)))
            .unwrap();
        let c = tree
            .add_child(root, ArmNode::new(Vec2::new(0.0, 200.0), Vec2::new(100.0, 0.0)))
            .unwrap();
        (tree, [a, b, c])
    }

    #[test]
    fn test_nearest_arm() {
        let (tree, [_, b, _]) = three_arms();

        let nearest = tree.nearest(Vec2::new(50.0, 110.0));

        assert_eq!(nearest.id, b);
        assert_close(nearest.offset, Vec2::new(50.0, 0.0));
        assert!((nearest.distance_squared - 100.0).abs() < EPS);
    }

    #[test]
    fn test_nearest_snaps_to_endpoints() {
        let (tree, [_, b, _]) = three_arms();

        let nearest = tree.nearest(Vec2::new(180.0, 95.0));

        assert_eq!(nearest.id, b);
        assert_close(nearest.offset, Vec2::new(100.0, 0.0));
        assert!((nearest.distance_squared - (80.0 * 80.0 + 25.0)).abs() < EPS);
    }

    #[test]
    fn test_nearest_ties_keep_first_in_preorder() {
        let (tree, [a, ..]) = three_arms();

        let nearest = tree.nearest(Vec2::new(50.0, 50.0));

        assert_eq!(nearest.id, a);
        assert!((nearest.distance_squared - 2500.0).abs() < EPS);
    }

    #[test]
    fn test_nearest_on_bare_root() {
        let tree = ArmTree::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0));

        let nearest = tree.nearest(Vec2::new(3.0, 14.0));

        assert_eq!(nearest.id, tree.root());
        assert_close(nearest.offset, Vec2::new(0.0, 10.0));
        assert!((nearest.distance_squared - 25.0).abs() < EPS);
    }

    #[test]
    fn test_nearest_selectable_skips_root() {
        let mut tree = ArmTree::new(Vec2::new(400.0, 300.0), Vec2::new(0.0, 0.1));
        let root = tree.root();
        assert_eq!(tree.nearest(Vec2::new(400.0, 300.0)).id, root);
        assert!(tree.nearest_selectable(Vec2::new(400.0, 300.0)).is_none());

        let arm = tree
            .add_child(root, ArmNode::new(Vec2::new(600.0, 300.0), Vec2::new(50.0, 0.0)))
            .unwrap();

        let hit = tree.nearest_selectable(Vec2::new(400.0, 300.0)).unwrap();
        assert_eq!(hit.id, arm);
        assert_close(hit.offset, Vec2::ZERO);
    }

    #[test]
    fn test_remove_compacts_children() {
        let (mut tree, [a, b, c]) = three_arms();
        let root = tree.root();
        tree.add_child(b, ArmNode::new(Vec2::new(50.0, 100.0), Vec2::ONE))
            .unwrap();

        let removal = tree.remove_child(root, b).unwrap();

        assert_eq!(removal.removed, 2);
        assert!(!removal.root_emptied);
        assert_eq!(tree.root_node().children(), &[a, c]);
        assert_eq!(tree.len(), 3);
        assert!(!tree.contains(b));
    }

    #[test]
    fn test_remove_last_arm_reports_empty_root() {
        let mut tree = tree();
        let root = tree.root();
        let arm = tree
            .add_child(root, ArmNode::new(Vec2::new(400.0, 300.0), Vec2::new(10.0, 0.0)))
            .unwrap();

        let removal = tree.remove(arm).unwrap();

        assert!(removal.root_emptied);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_remove_errors() {
        let (mut tree, [a, b, _]) = three_arms();
        let root = tree.root();

        assert_eq!(tree.remove(root), Err(ArmError::RootImmutable));
        assert_eq!(tree.remove_child(a, b), Err(ArmError::UnknownArm(b)));
        tree.remove(a).unwrap();
        assert_eq!(tree.remove(a), Err(ArmError::UnknownArm(a)));
    }

    #[test]
    fn test_clear_children_drops_subtrees() {
        let (mut tree, [a, ..]) = three_arms();
        let root = tree.root();
        tree.add_child(a, ArmNode::new(Vec2::new(50.0, 0.0), Vec2::ONE))
            .unwrap();

        let dropped = tree.clear_children(root).unwrap();

        assert_eq!(dropped, 4);
        assert_eq!(tree.len(), 1);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_slide_on_parent_clamps_and_propagates() {
        let mut tree = tree();
        let root = tree.root();
        let parent = tree
            .add_child(root, ArmNode::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0)))
            .unwrap();
        let child = tree
            .add_child(parent, ArmNode::new(Vec2::new(50.0, 50.0), Vec2::new(0.0, 40.0)))
            .unwrap();
        let grandchild = tree
            .add_child(child, ArmNode::new(Vec2::new(50.0, 70.0), Vec2::ONE))
            .unwrap();

        tree.slide_on_parent(child, Vec2::new(500.0, 480.0)).unwrap();

        let node = tree.node(child).unwrap();
        assert_eq!(node.position_on_parent(), 1.0);
        assert_close(node.position_initial, Vec2::new(100.0, 100.0));
        assert_close(tree.node(grandchild).unwrap().position_initial, Vec2::new(100.0, 120.0));

        tree.slide_on_parent(child, Vec2::new(30.0, 10.0)).unwrap();
        let node = tree.node(child).unwrap();
        assert!((node.position_on_parent() - 0.2).abs() < 1e-5);
        assert_close(node.position, Vec2::new(20.0, 20.0));

        assert_eq!(
            tree.slide_on_parent(root, Vec2::ZERO),
            Err(ArmError::RootImmutable)
        );
    }

    #[test]
    fn test_set_direction_propagates_diagonal() {
        let mut tree = tree();
        let root = tree.root();
        let parent = tree
            .add_child(root, ArmNode::new(Vec2::ZERO, Vec2::new(100.0, 0.0)))
            .unwrap();
        let child = tree
            .add_child(parent, ArmNode::new(Vec2::new(50.0, 0.0), Vec2::ONE))
            .unwrap();

        tree.set_direction(parent, Vec2::new(100.0 * FRAC_1_SQRT_2, 100.0 * FRAC_1_SQRT_2))
            .unwrap();

        let expected = Vec2::splat(50.0 * FRAC_1_SQRT_2);
        assert_close(tree.node(child).unwrap().position_initial, expected);
    }

    #[test]
    fn test_draw_skips_root_and_draws_children_first() {
        let mut canvas = DrawList::default();
        let mut tree = tree();
        let root = tree.root();
        let parent = tree
            .add_child(root, ArmNode::new(Vec2::new(400.0, 300.0), Vec2::new(100.0, 0.0)))
            .unwrap();
        tree.add_child(parent, ArmNode::new(Vec2::new(450.0, 300.0), Vec2::new(0.0, 30.0)))
            .unwrap();
        tree.node_mut(parent).unwrap().trail_on = true;

        tree.draw(&mut canvas, Highlight::Highlight, Color::BLACK);

        let lines: Vec<_> = canvas
            .frame_commands()
            .iter()
            .filter_map(|c| match c {
                crate::canvas::DrawCommand::Line { to, .. } => Some(*to),
                _ => None,
            })
            .collect();
        assert_eq!(lines, vec![Vec2::new(450.0, 330.0), Vec2::new(500.0, 300.0)]);
        // Trail-off child: background fill + outline; trail-on parent: one fill.
        assert_eq!(canvas.frame_commands().len(), 2 + 2 + 1);
    }

    #[test]
    fn test_draw_trails_only_for_enabled_arms() {
        let mut canvas = DrawList::default();
        let mut tree = tree();
        let root = tree.root();
        let on = tree
            .add_child(root, ArmNode::new(Vec2::new(400.0, 300.0), Vec2::new(100.0, 0.0)))
            .unwrap();
        tree.add_child(root, ArmNode::new(Vec2::new(400.0, 300.0), Vec2::new(0.0, 50.0)))
            .unwrap();
        tree.node_mut(on).unwrap().trail_on = true;

        tree.rotate(0.1, true);
        tree.draw_trails(&mut canvas);
        assert_eq!(canvas.trail_len(), 0);

        tree.rotate(0.1, true);
        tree.draw_trails(&mut canvas);
        assert_eq!(canvas.trail_len(), 1);
    }
}
