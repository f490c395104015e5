// facet/content/src/instructions.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Compilation of render programs into a flat instruction stream, and its interpreter.

use crate::gradient::{Gradient, GradientAccuracy};
use crate::program::{self, PathId, RenderProgram};
use facet_color::{ColorConversion, ColorF};
use facet_geometry::line_segment::LineSegment2F;
use facet_geometry::rect::RectF;
use facet_geometry::vector::Vector2F;
use smallvec::SmallVec;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Instruction {
    PushConstant(ColorF),
    /// Pops the source, then the destination, and pushes source-over-destination.
    StackBlend,
    Alpha(f32),
    Premultiply,
    Unpremultiply,
    Convert(ColorConversion),
    /// Pushes the color of the indexed gradient.
    Gradient(u32),
    /// Pops the `one` color, then the `zero` color, and pushes their blend by the indexed ratio.
    Lerp(u32),
    Exit,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ProgramError {
    /// The program still distinguishes insideness of this path; it must be simplified first.
    UnresolvedPathBoolean(PathId),
    /// An instruction consumes more values than the stack holds.
    StackUnderflow,
    /// The stream did not end with `Exit` and exactly one value on the stack.
    UnbalancedStack,
    /// A `Gradient` or `Lerp` instruction refers to a missing table entry.
    UnknownTableEntry(u32),
}

impl Display for ProgramError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match *self {
            ProgramError::UnresolvedPathBoolean(path) => {
                write!(formatter, "program depends on the insideness of {}", path)
            }
            ProgramError::StackUnderflow => write!(formatter, "instruction stack underflow"),
            ProgramError::UnbalancedStack => write!(formatter, "unbalanced instruction stream"),
            ProgramError::UnknownTableEntry(index) => {
                write!(formatter, "no table entry at index {}", index)
            }
        }
    }
}

impl Error for ProgramError {}

/// The geometry of the region a program is evaluated for.
#[derive(Clone, Copy, Debug)]
pub struct EvaluationContext {
    pub area: f64,
    pub centroid: Vector2F,
    pub pixel_center: Vector2F,
    pub bounds: RectF,
}

impl EvaluationContext {
    #[inline]
    fn sample_point(&self, accuracy: GradientAccuracy) -> Vector2F {
        match accuracy {
            GradientAccuracy::Centroid => self.centroid,
            GradientAccuracy::PixelCenter => self.pixel_center,
        }
    }
}

/// Per-`Lerp` data: the blend line and where it is sampled.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BlendRatio {
    pub line: LineSegment2F,
    pub accuracy: GradientAccuracy,
}

#[derive(Clone, PartialEq, Debug)]
pub struct CompiledProgram {
    instructions: Vec<Instruction>,
    gradients: Vec<Gradient>,
    blends: Vec<BlendRatio>,
}

type Stack = SmallVec<[ColorF; 8]>;

impl CompiledProgram {
    /// Validates an externally produced instruction stream.
    pub fn from_parts(instructions: Vec<Instruction>,
                      gradients: Vec<Gradient>,
                      blends: Vec<BlendRatio>)
                      -> Result<CompiledProgram, ProgramError> {
        let mut depth: usize = 0;
        for instruction in &instructions {
            let (pops, pushes) = match *instruction {
                Instruction::PushConstant(_) => (0, 1),
                Instruction::Gradient(index) => {
                    if index as usize >= gradients.len() {
                        return Err(ProgramError::UnknownTableEntry(index));
                    }
                    (0, 1)
                }
                Instruction::Lerp(index) => {
                    if index as usize >= blends.len() {
                        return Err(ProgramError::UnknownTableEntry(index));
                    }
                    (2, 1)
                }
                Instruction::StackBlend => (2, 1),
                Instruction::Alpha(_) |
                Instruction::Premultiply |
                Instruction::Unpremultiply |
                Instruction::Convert(_) => (1, 1),
                Instruction::Exit => {
                    if depth != 1 {
                        return Err(ProgramError::UnbalancedStack);
                    }
                    return Ok(CompiledProgram { instructions, gradients, blends });
                }
            };
            if depth < pops {
                return Err(ProgramError::StackUnderflow);
            }
            depth = depth - pops + pushes;
        }
        Err(ProgramError::UnbalancedStack)
    }

    #[inline]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Runs the program. If more than `oops_limit` instructions execute, the oops color is
    /// returned instead.
    pub fn evaluate(&self, context: &EvaluationContext, oops_limit: u32) -> ColorF {
        let mut stack = Stack::new();
        for (step, instruction) in self.instructions.iter().enumerate() {
            if step as u32 > oops_limit {
                warn!("program exceeded {} instructions", oops_limit);
                return ColorF::oops();
            }
            match *instruction {
                Instruction::PushConstant(color) => stack.push(color),
                Instruction::StackBlend => {
                    let source = pop(&mut stack);
                    let dest = pop(&mut stack);
                    stack.push(source.over(dest));
                }
                Instruction::Alpha(alpha) => {
                    let color = pop(&mut stack);
                    stack.push(color.scale(alpha));
                }
                Instruction::Premultiply => {
                    let color = pop(&mut stack);
                    stack.push(color.premultiply());
                }
                Instruction::Unpremultiply => {
                    let color = pop(&mut stack);
                    stack.push(color.unpremultiply());
                }
                Instruction::Convert(conversion) => {
                    let color = pop(&mut stack);
                    stack.push(conversion.apply(color));
                }
                Instruction::Gradient(index) => {
                    let gradient = &self.gradients[index as usize];
                    let point = context.sample_point(gradient.accuracy);
                    match gradient.sample_point(point, oops_limit) {
                        Some(color) => stack.push(color),
                        None => {
                            warn!("gradient stop search exceeded {} steps", oops_limit);
                            return ColorF::oops();
                        }
                    }
                }
                Instruction::Lerp(index) => {
                    let blend = &self.blends[index as usize];
                    let one = pop(&mut stack);
                    let zero = pop(&mut stack);
                    let point = context.sample_point(blend.accuracy);
                    let ratio = program::clamped_line_ratio(blend.line, point);
                    stack.push(zero.lerp(one, ratio as f32));
                }
                Instruction::Exit => break,
            }
        }
        pop(&mut stack)
    }
}

#[inline]
fn pop(stack: &mut Stack) -> ColorF {
    debug_assert!(!stack.is_empty());
    stack.pop().unwrap_or_default()
}

#[derive(Default)]
struct Compiler {
    instructions: Vec<Instruction>,
    gradients: Vec<Gradient>,
    blends: Vec<BlendRatio>,
}

impl Compiler {
    fn compile(&mut self, program: &RenderProgram) -> Result<(), ProgramError> {
        match *program {
            RenderProgram::Constant(color) => {
                self.instructions.push(Instruction::PushConstant(color))
            }
            RenderProgram::PathBoolean { path, .. } => {
                return Err(ProgramError::UnresolvedPathBoolean(path))
            }
            RenderProgram::Stack(ref children) => {
                match children.split_first() {
                    None => {
                        let transparent = ColorF::transparent_black();
                        self.instructions.push(Instruction::PushConstant(transparent));
                    }
                    Some((first, rest)) => {
                        self.compile(first)?;
                        for child in rest {
                            self.compile(child)?;
                            self.instructions.push(Instruction::StackBlend);
                        }
                    }
                }
            }
            RenderProgram::Alpha(ref child, alpha) => {
                self.compile(child)?;
                self.instructions.push(Instruction::Alpha(alpha));
            }
            RenderProgram::Premultiply(ref child) => {
                self.compile(child)?;
                self.instructions.push(Instruction::Premultiply);
            }
            RenderProgram::Unpremultiply(ref child) => {
                self.compile(child)?;
                self.instructions.push(Instruction::Unpremultiply);
            }
            RenderProgram::ColorSpaceConversion(ref child, conversion) => {
                self.compile(child)?;
                self.instructions.push(Instruction::Convert(conversion));
            }
            RenderProgram::Gradient(ref gradient) => {
                self.instructions.push(Instruction::Gradient(self.gradients.len() as u32));
                self.gradients.push(gradient.clone());
            }
            RenderProgram::LinearBlend(ref blend) => {
                self.compile(&blend.zero)?;
                self.compile(&blend.one)?;
                self.instructions.push(Instruction::Lerp(self.blends.len() as u32));
                self.blends.push(BlendRatio { line: blend.line, accuracy: blend.accuracy });
            }
        }
        Ok(())
    }
}

/// Compiles a simplified program.
pub fn compile(program: &RenderProgram) -> Result<CompiledProgram, ProgramError> {
    let mut compiler = Compiler::default();
    compiler.compile(program)?;
    compiler.instructions.push(Instruction::Exit);
    CompiledProgram::from_parts(compiler.instructions, compiler.gradients, compiler.blends)
}
