//! The fixed Wuvi vocabulary.
//!
//! Type markers and boolean literals share spellings (`>>` is both the
//! Bool type marker and the false literal), but they are kept as
//! separate constants so that changing one never silently changes the
//! other.

/// Starts a function definition header.
pub const DEFINITION_KEYWORD: &str = "init";

/// Separates a variable name from its type marker.
pub const ASSIGN: &str = "=";

/// Any line containing this text ends a function body.
pub const TERMINATOR: &str = "end";

// Type markers
pub const STRING_MARKER: &str = ">>+>";
pub const INTEGER_MARKER: &str = "<<-";
pub const FLOAT_MARKER: &str = ">>+>>";
pub const DOUBLE_MARKER: &str = ">><<++--__";
pub const BOOL_MARKER: &str = ">>";
pub const BOOL_TRUE_MARKER: &str = "<<>>";
pub const CHAR_MARKER: &str = "_+_";
pub const NULL_MARKER: &str = "_-_";

// Boolean literals
pub const TRUE_LITERAL: &str = "<<>>";
pub const FALSE_LITERAL: &str = ">>";

// Builtin opcodes
pub const OP_PRINT: u32 = 58;
pub const OP_INPUT: u32 = 67;
pub const OP_ADD: u32 = 24;
pub const OP_SUBTRACT: u32 = 32;
pub const OP_DIVIDE: u32 = 15;
pub const OP_MULTIPLY: u32 = 45;
pub const OP_POWER: u32 = 40;
pub const OP_MODULO: u32 = 0;

/// Printed by every arithmetic opcode instead of a result.
pub const MATH_NOTICE: &str = "Math operations need implementation (they won't be implemented, they are just added in here for coziness)";

/// The sample program shipped with the interpreter.
pub const DEMO: &str = "
msg = >>+> Hello_World!
58 msg
x = <<- 42
58 x
flag = <<>> <<>>
58 flag
";
