mod instructions;
mod nutrition;

pub use instructions::{format_instructions, InstructionFormatter};
pub use nutrition::{render_nutrition, Locale};
