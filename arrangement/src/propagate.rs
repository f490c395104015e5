// facet/arrangement/src/propagate.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Propagation of winding numbers from the unbounded face across shared edges.

use crate::face::RationalFace;
use crate::mesh::{FaceId, HalfEdgeMesh};
use crate::winding::WindingMap;
use std::collections::VecDeque;

/// Records, for each face, the winding difference to each adjacent face.
pub fn compute_winding_map_maps(mesh: &HalfEdgeMesh, faces: &mut [RationalFace]) {
    for half_edge in &mesh.half_edges {
        let face = match half_edge.face {
            Some(face) => face,
            None => continue,
        };
        let other = match mesh.half_edge(half_edge.reversed).face {
            Some(other) if other != face => other,
            _ => continue,
        };
        let entry = faces[face.index()].winding_map_map.entry(other).or_insert_with(|| {
            half_edge.winding_map.clone()
        });
        if *entry != half_edge.winding_map {
            warn!("inconsistent winding between {:?} and {:?}; are all paths closed?", face, other);
        }
    }
}

/// Assigns every face its winding map by breadth-first search from the unbounded face, whose
/// winding is zero everywhere. Returns the number of faces reached.
pub fn propagate_windings(faces: &mut [RationalFace]) -> usize {
    if faces.is_empty() {
        return 0;
    }

    let mut visited = vec![false; faces.len()];
    let mut queue = VecDeque::new();
    visited[0] = true;
    faces[0].winding_map = WindingMap::new();
    queue.push_back(FaceId(0));

    let mut reached = 1;
    while let Some(face) = queue.pop_front() {
        let winding_map = faces[face.index()].winding_map.clone();
        let neighbors: Vec<(FaceId, WindingMap)> =
            faces[face.index()].winding_map_map
                               .iter()
                               .map(|(&neighbor, delta)| (neighbor, &winding_map - delta))
                               .collect();
        for (neighbor, neighbor_winding) in neighbors {
            if visited[neighbor.index()] {
                if faces[neighbor.index()].winding_map != neighbor_winding {
                    warn!("winding of {:?} depends on the path taken to it", neighbor);
                }
                continue;
            }
            visited[neighbor.index()] = true;
            faces[neighbor.index()].winding_map = neighbor_winding;
            queue.push_back(neighbor);
            reached += 1;
        }
    }

    if reached < faces.len() {
        warn!("{} faces are not connected to the unbounded face", faces.len() - reached);
    }
    reached
}
