// facet/renderer/src/binder.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Binding render programs to arrangement faces.

use crate::error::RasterizeError;
use crate::options::{FaceRepresentation, RasterizeOptions};
use crate::path::RenderPath;
use facet_arrangement::concurrent::executor::Executor;
use facet_arrangement::mesh::FaceId;
use facet_arrangement::Arrangement;
use facet_content::face::{ClippableFace, ClippableFaceKind, EdgedFace, PolygonalFace};
use facet_content::instructions::{self, CompiledProgram, ProgramError};
use facet_content::program::{PathId, RenderProgram};
use facet_geometry::rect::RectF;
use facet_geometry::transform2d::Transform2F;

/// A face in output coordinates with the program that colors it.
#[derive(Clone, Debug)]
pub struct RenderableFace {
    pub face: ClippableFaceKind,
    /// Free of path booleans.
    pub program: RenderProgram,
    pub compiled: CompiledProgram,
    pub bounds: RectF,
}

impl RenderableFace {
    pub fn new(face: ClippableFaceKind, program: RenderProgram)
               -> Result<RenderableFace, ProgramError> {
        let compiled = instructions::compile(&program)?;
        let bounds = face.bounds();
        Ok(RenderableFace { face, program, compiled, bounds })
    }
}

/// Resolves `program` for every bounded face of `arrangement` using the fill rules of `paths`,
/// keeping the faces that are not fully transparent. Winding numbers of paths beyond
/// `paths.len()` never count as inside.
pub fn bind_faces<E>(arrangement: &Arrangement,
                     paths: &[RenderPath],
                     program: &RenderProgram,
                     to_output: &Transform2F,
                     options: &RasterizeOptions,
                     executor: &E)
                     -> Result<Vec<RenderableFace>, RasterizeError>
                     where E: Executor {
    let face_ids: Vec<FaceId> = arrangement.bounded_faces().map(|(id, _)| id).collect();
    let representation = options.face_representation;

    let bound = executor.build_vector(face_ids.len(), |index| {
        let id = face_ids[index];
        let winding_map = &arrangement.face(id).winding_map;
        let is_inside = |path: PathId| {
            paths.get(path.index())
                 .map_or(false, |render_path| render_path.fill_rule.is_inside(winding_map.get(path)))
        };
        let program = program.simplify(&is_inside);
        if program.is_fully_transparent() {
            return None;
        }
        let face = match representation {
            FaceRepresentation::Polygonal => {
                ClippableFaceKind::Polygonal(PolygonalFace::new(arrangement.face_polygon(id,
                                                                                       to_output)))
            }
            FaceRepresentation::Edged => {
                ClippableFaceKind::Edged(EdgedFace::new(arrangement.face_edges(id, to_output)))
            }
        };
        Some((face, program))
    });

    let mut bound: Vec<(ClippableFaceKind, RenderProgram)> = bound.into_iter().flatten().collect();
    let kept_count = bound.len();
    if options.combine_faces {
        bound = combine_faces(bound, representation);
    }

    let faces = bound.into_iter()
                     .map(|(face, program)| RenderableFace::new(face, program))
                     .collect::<Result<Vec<_>, _>>()?;
    debug!("bound {} of {} faces into {} renderable faces",
           kept_count,
           face_ids.len(),
           faces.len());
    Ok(faces)
}

/// Merges faces with equal programs, in order of first appearance.
fn combine_faces(faces: Vec<(ClippableFaceKind, RenderProgram)>,
                 representation: FaceRepresentation)
                 -> Vec<(ClippableFaceKind, RenderProgram)> {
    let mut groups: Vec<(RenderProgram, Vec<ClippableFaceKind>)> = vec![];
    for (face, program) in faces {
        match groups.iter_mut().find(|(group_program, _)| *group_program == program) {
            Some((_, group)) => group.push(face),
            None => groups.push((program, vec![face])),
        }
    }

    groups.into_iter().map(|(program, mut faces)| {
        if faces.len() == 1 {
            if let Some(face) = faces.pop() {
                return (face, program);
            }
        }
        (merge_faces(faces, representation), program)
    }).collect()
}

fn merge_faces(faces: Vec<ClippableFaceKind>, representation: FaceRepresentation)
               -> ClippableFaceKind {
    match representation {
        FaceRepresentation::Polygonal => {
            let mut merged = PolygonalFace::default();
            for face in faces {
                match face {
                    ClippableFaceKind::Polygonal(face) => merged = merged.union(face),
                    ClippableFaceKind::Edged(_) => {
                        warn!("edged face in a polygonal merge");
                    }
                }
            }
            ClippableFaceKind::Polygonal(merged)
        }
        FaceRepresentation::Edged => {
            let mut merged = EdgedFace::new(faces.iter()
                                                 .flat_map(|face| face.to_edged().edges)
                                                 .collect());
            merged.remove_canceling_edges();
            ClippableFaceKind::Edged(merged)
        }
    }
}
