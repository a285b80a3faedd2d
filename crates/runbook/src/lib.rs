// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Project configuration: parsing, discovery, templating and environment files

mod env;
mod find;
mod parser;
mod project;
mod template;

pub use env::{
    expand_args, expand_value, expand_value_with, load_env_file, parse_env_lines, parse_env_pairs,
    EnvFileError,
};
pub use find::{find_project, load_action, load_project, FindError, CONFIG_EXTENSIONS};
pub use parser::{parse_project, parse_project_with_format, Format, ParseError};
pub use project::{JobDef, Project, ProjectDef, StepDef};
pub use template::{render, TemplateError};
