//! Constant expression evaluation.
//!
//! [`Ast::evaluate`] is total: anything it cannot interpret becomes 0, including
//! division or modulus by zero and node kinds that are not arithmetic.

use tracing::debug;

use crate::ast::{Ast, BinaryOp, NodeId, NodeKind, UnaryOp};

/// Parse the first run of decimal digits in `text`.
///
/// Characters before the run are skipped, so `0x1F` reads as `0` and `abc42` as `42`.
/// Text without digits is `0`. Overlong runs wrap.
pub fn parse_leading_integer(text: &str) -> i64 {
    text.bytes()
        .skip_while(|b| !b.is_ascii_digit())
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.wrapping_mul(10).wrapping_add(i64::from(digit - b'0'))
        })
}

fn shift_amount(rhs: i64) -> Option<u32> {
    u32::try_from(rhs).ok().filter(|s| *s < i64::BITS)
}

fn apply_unary(op: UnaryOp, operand: i64) -> i64 {
    match op {
        UnaryOp::Negate => operand.wrapping_neg(),
        UnaryOp::Not => i64::from(operand == 0),
        UnaryOp::BitNot => !operand,
        UnaryOp::Invalid => 0,
    }
}

fn apply_binary(op: BinaryOp, lhs: i64, rhs: i64) -> i64 {
    match op {
        BinaryOp::Add => lhs.wrapping_add(rhs),
        BinaryOp::Sub => lhs.wrapping_sub(rhs),
        BinaryOp::Mul => lhs.wrapping_mul(rhs),
        BinaryOp::Div | BinaryOp::Mod if rhs == 0 => {
            debug!(?op, lhs, "division by zero folded to 0");
            0
        }
        BinaryOp::Div => lhs.wrapping_div(rhs),
        BinaryOp::Mod => lhs.wrapping_rem(rhs),
        BinaryOp::Shl => shift_amount(rhs).map_or(0, |s| lhs << s),
        BinaryOp::Shr => shift_amount(rhs).map_or(0, |s| lhs >> s),
        BinaryOp::BitAnd => lhs & rhs,
        BinaryOp::BitOr => lhs | rhs,
        BinaryOp::And => i64::from(lhs != 0 && rhs != 0),
        BinaryOp::Or => i64::from(lhs != 0 || rhs != 0),
        BinaryOp::Invalid => 0,
    }
}

impl Ast {
    /// Reduce an expression subtree to an integer.
    ///
    /// Numeric literals use [`parse_leading_integer`]; operators recurse into their
    /// operands. Every other kind, identifiers included, evaluates to 0.
    pub fn evaluate(&self, node: NodeId) -> i64 {
        let n = self.node(node);
        match &n.kind {
            NodeKind::NumericConstant => parse_leading_integer(n.name()),
            NodeKind::UnaryOperator { op, operand } => apply_unary(*op, self.evaluate(*operand)),
            NodeKind::BinaryOperator { op, left, right } => {
                let lhs = self.evaluate(*left);
                let rhs = self.evaluate(*right);
                apply_binary(*op, lhs, rhs)
            }
            _ => 0,
        }
    }
}
