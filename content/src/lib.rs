// facet/content/src/lib.rs
//
// Copyright © 2024 The Facet Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Clipping primitives, clippable faces, and the render programs that color them.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

pub mod circular;
pub mod clip;
pub mod edge;
pub mod face;
pub mod fill;
pub mod gradient;
pub mod instructions;
pub mod program;
pub mod simplifier;
