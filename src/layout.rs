//! Circle packing for a scanned tree.
//!
//! Every item becomes a circle. Children start on a grid inside their
//! folder, then get relaxed toward the folder centre while bouncing off each
//! other. Finally every folder shrinks to the smallest circle holding its
//! children.

use crate::Item;
use crate::config::MapConfig;
use crate::geometry::{Area, Point};
use crate::viewer::FolderAttributes;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Circles never get smaller than this, so zoom targets stay finite.
const MIN_RADIUS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub pos: Point,
    pub radius: f64,
    pub speed: Point,
}

impl Entity {
    fn at(pos: Point, radius: f64) -> Self {
        Self {
            pos,
            radius,
            speed: Point::ZERO,
        }
    }

    pub fn bounding_box(&self) -> Area {
        Area::new(
            self.pos.0 - self.radius,
            self.pos.1 - self.radius,
            self.pos.0 + self.radius,
            self.pos.1 + self.radius,
        )
    }

    /// Transform that zooms the view root onto this circle, and the text
    /// scale that keeps labels readable at that zoom.
    pub fn zoom_target(&self, canvas_size: f64) -> FolderAttributes {
        let area = self.bounding_box();
        let size = area.width().min(area.height()) * 1.5;
        let scale = canvas_size / size;
        let center = area.center();
        let left = center.0 - size / 2.0;
        let top = center.1 - size / 2.0;
        FolderAttributes {
            transform: Some(format!(
                "scale({scale}) translate({}px, {}px)",
                -left, -top
            )),
            text_scale: Some(1.0 / scale),
        }
    }
}

/// A placed item. Files have no children.
#[derive(Debug, Clone)]
pub struct LayoutNode<'a> {
    pub entity: Entity,
    pub item: &'a Item,
    pub children: Vec<LayoutNode<'a>>,
}

impl<'a> LayoutNode<'a> {
    /// Lays out `item` on a square canvas according to `config`.
    pub fn build(item: &'a Item, config: &MapConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scale = RadiusScale {
            files: item.files(),
            log_total: item.log_weight(),
            canvas_size: config.canvas_size,
        };
        let size = config.canvas_size;
        let mut root = place(item, Area::new(0.0, 0.0, size, size), &scale);
        for pass in 0..config.layout_passes {
            log::debug!("Layout pass {}/{}", pass + 1, config.layout_passes);
            root.relax(config, &mut rng);
            root.shrink(config.spacing);
        }
        root
    }

    pub fn is_folder(&self) -> bool {
        self.item.is_folder()
    }

    /// Moves this node and everything below it.
    pub fn translate(&mut self, delta: Point) {
        self.entity.pos = self.entity.pos + delta;
        for child in &mut self.children {
            child.translate(delta);
        }
    }

    /// Follows a `/` separated path of child names.
    pub fn descend(&self, path: &str) -> Option<&LayoutNode<'a>> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| {
                node.children.iter().find(|c| c.item.name() == segment)
            })
    }

    /// Centre of the file a reference points at, matched on the file name
    /// or on a trailing part of its path.
    pub fn find_ref(&self, reference: &str) -> Option<Point> {
        match self.item {
            Item::File {
                name, full_name, ..
            } => {
                let suffix_match = full_name
                    .strip_suffix(reference)
                    .is_some_and(|head| head.is_empty() || head.ends_with('/'));
                (name == reference || suffix_match).then_some(self.entity.pos)
            }
            Item::Folder { .. } => self
                .children
                .iter()
                .find_map(|child| child.find_ref(reference)),
        }
    }

    fn relax(&mut self, config: &MapConfig, rng: &mut StdRng) {
        if !self.is_folder() {
            return;
        }
        relax_children(&self.entity, &mut self.children, config, rng);
        for child in &mut self.children {
            child.relax(config, rng);
        }
    }

    fn shrink(&mut self, spacing: f64) {
        for child in &mut self.children {
            child.shrink(spacing);
        }
        if self.children.is_empty() {
            return;
        }
        let center = self.entity.pos;
        let mut radius: f64 = 0.0;
        for child in &self.children {
            let reach = child.entity.pos.distance(center) + child.entity.radius + spacing;
            radius = radius.max(reach);
        }
        self.entity.radius = radius.max(MIN_RADIUS);
    }
}

struct RadiusScale {
    files: usize,
    log_total: f64,
    canvas_size: f64,
}

impl RadiusScale {
    fn radius(&self, item: &Item) -> f64 {
        let log_total = if self.log_total > 0.0 { self.log_total } else { 1.0 };
        let radius = item.log_weight() / log_total
            * self.canvas_size
            * 0.5
            * 1.0005_f64.powi(self.files as i32);
        radius.max(MIN_RADIUS)
    }
}

/// Initial placement: children fill a square grid over the folder's area.
fn place<'a>(item: &'a Item, area: Area, scale: &RadiusScale) -> LayoutNode<'a> {
    let entity = Entity::at(area.center(), scale.radius(item));
    let children = match item {
        Item::File { .. } => Vec::new(),
        Item::Folder { items, .. } => {
            let base = (items.len() as f64).sqrt().ceil() as usize;
            items
                .iter()
                .zip(area.split_evenly((base, base)))
                .map(|(child, cell)| place(child, cell, scale))
                .collect()
        }
    };
    LayoutNode {
        entity,
        item,
        children,
    }
}

fn relax_children(
    folder: &Entity,
    items: &mut [LayoutNode],
    config: &MapConfig,
    rng: &mut StdRng,
) {
    if items.is_empty() {
        return;
    }
    let bounds = folder.bounding_box();
    let center = bounds.center();
    let mut order: Vec<usize> = (0..items.len()).collect();

    for _ in 0..config.layout_iterations {
        order.shuffle(rng);
        for &index in &order {
            let mut item = items[index].entity;
            item.speed = (center - item.pos).normalize() * 0.5 + item.speed;
            item.pos = item.pos + item.speed;

            for (other_index, other) in items.iter().enumerate() {
                if other_index == index {
                    continue;
                }
                let other = other.entity;
                let min_distance = item.radius + other.radius + config.spacing;
                if item.pos.distance(other.pos) < min_distance {
                    item.speed = (item.pos - other.pos).normalize() - other.speed * 0.75;
                    for _ in 0..100 {
                        item.pos = item.pos + item.speed * 0.1;
                        if item.pos.distance(other.pos) >= min_distance {
                            break;
                        }
                    }
                }
            }

            if item.pos.0 < bounds.start_x && item.speed.0 < 0.0 {
                item.speed.0 += 0.5;
            } else if item.pos.0 > bounds.end_x && item.speed.0 > 0.0 {
                item.speed.0 -= 0.5;
            }
            if item.pos.1 < bounds.start_y && item.speed.1 < 0.0 {
                item.speed.1 += 0.5;
            } else if item.pos.1 > bounds.end_y && item.speed.1 > 0.0 {
                item.speed.1 -= 0.5;
            }

            let delta = item.pos - items[index].entity.pos;
            items[index].translate(delta);
            items[index].entity.speed = item.speed;
        }
    }

    // Recentre the cluster on the folder.
    let first = items[0].entity;
    let mut extent = Area::at(first.pos);
    for node in items.iter() {
        extent.include_circle(node.entity.pos, node.entity.radius);
    }
    let offset = center - extent.center();
    for node in items.iter_mut() {
        node.translate(offset);
    }
}
