//! Abstract Syntax Tree types
//!
//! The node set is closed: numbers, variables, unary function application and
//! five binary operators. Passes walk the tree through [`Visitor`]. The walk,
//! `node_count`, `Display` and `Drop` all run on an explicit work stack, so a
//! long left-leaning chain such as `1+1+...+1` never recurses per operator.

use std::fmt;

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal
    Number(f64),
    /// Reference to a constant or a runtime binding
    Variable(String),
    /// Application of a registered unary function
    Function { name: String, operand: Box<Expr> },
    /// Binary arithmetic
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Exponentiation (`^`)
    Pow,
}

impl BinOp {
    /// Surface symbol
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
        }
    }

    /// Apply the operator with IEEE-754 double semantics
    #[inline]
    pub fn apply(
        self,
        left: f64,
        right: f64,
    ) -> f64 {
        match self {
            BinOp::Add => left + right,
            BinOp::Sub => left - right,
            BinOp::Mul => left * right,
            BinOp::Div => left / right,
            BinOp::Pow => left.powf(right),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Expr {
    pub fn number(value: f64) -> Self {
        Expr::Number(value)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn call(
        name: impl Into<String>,
        operand: Expr,
    ) -> Self {
        Expr::Function {
            name: name.into(),
            operand: Box::new(operand),
        }
    }

    pub fn binary(
        op: BinOp,
        left: Expr,
        right: Expr,
    ) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn add(
        left: Expr,
        right: Expr,
    ) -> Self {
        Self::binary(BinOp::Add, left, right)
    }

    pub fn sub(
        left: Expr,
        right: Expr,
    ) -> Self {
        Self::binary(BinOp::Sub, left, right)
    }

    pub fn mul(
        left: Expr,
        right: Expr,
    ) -> Self {
        Self::binary(BinOp::Mul, left, right)
    }

    pub fn div(
        left: Expr,
        right: Expr,
    ) -> Self {
        Self::binary(BinOp::Div, left, right)
    }

    pub fn pow(
        base: Expr,
        exponent: Expr,
    ) -> Self {
        Self::binary(BinOp::Pow, base, exponent)
    }

    /// Walk the tree in post-order, calling the visitor for every node
    ///
    /// Children are visited left to right. `enter_function` fires before the
    /// operand, `leave_function` and `leave_binary` after the children.
    pub fn accept<V: Visitor + ?Sized>(
        &self,
        visitor: &mut V,
    ) {
        let mut work = vec![Step::Visit(self)];
        while let Some(step) = work.pop() {
            match step {
                Step::Visit(Expr::Number(value)) => visitor.visit_number(*value),
                Step::Visit(Expr::Variable(name)) => visitor.visit_variable(name),
                Step::Visit(Expr::Function { name, operand }) => {
                    visitor.enter_function(name);
                    work.push(Step::LeaveFunction(name));
                    work.push(Step::Visit(operand));
                }
                Step::Visit(Expr::Binary { op, left, right }) => {
                    work.push(Step::LeaveBinary(*op));
                    work.push(Step::Visit(right));
                    work.push(Step::Visit(left));
                }
                Step::LeaveFunction(name) => visitor.leave_function(name),
                Step::LeaveBinary(op) => visitor.leave_binary(op),
            }
        }
    }

    /// Number of nodes in the tree
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut work = vec![self];
        while let Some(node) = work.pop() {
            count += 1;
            match node {
                Expr::Number(_) | Expr::Variable(_) => {}
                Expr::Function { operand, .. } => work.push(operand),
                Expr::Binary { left, right, .. } => {
                    work.push(right);
                    work.push(left);
                }
            }
        }
        count
    }

    /// Move boxed children that have children of their own into `out`
    fn detach_children(
        &mut self,
        out: &mut Vec<Expr>,
    ) {
        match self {
            Expr::Number(_) | Expr::Variable(_) => {}
            Expr::Function { operand, .. } => detach(operand, out),
            Expr::Binary { left, right, .. } => {
                detach(left, out);
                detach(right, out);
            }
        }
    }
}

fn detach(
    child: &mut Expr,
    out: &mut Vec<Expr>,
) {
    if matches!(child, Expr::Function { .. } | Expr::Binary { .. }) {
        out.push(std::mem::replace(child, Expr::Number(0.0)));
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

/// Pending work for [`Expr::accept`]
enum Step<'a> {
    Visit(&'a Expr),
    LeaveFunction(&'a str),
    LeaveBinary(BinOp),
}

/// AST visitor
///
/// Every method defaults to doing nothing, so a pass only overrides the
/// events it cares about.
pub trait Visitor {
    fn visit_number(
        &mut self,
        _value: f64,
    ) {
    }

    fn visit_variable(
        &mut self,
        _name: &str,
    ) {
    }

    /// Function node, before its operand
    fn enter_function(
        &mut self,
        _name: &str,
    ) {
    }

    /// Function node, after its operand
    fn leave_function(
        &mut self,
        _name: &str,
    ) {
    }

    /// Binary node, after both children
    fn leave_binary(
        &mut self,
        _op: BinOp,
    ) {
    }
}

/// Pending output for the `Display` impl
enum Piece<'a> {
    Node(&'a Expr),
    Op(BinOp),
    Close,
}

impl fmt::Display for Expr {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let mut work = vec![Piece::Node(self)];
        while let Some(piece) = work.pop() {
            match piece {
                // `{:?}` keeps the fractional part: 2.0 renders as "2.0", not "2"
                Piece::Node(Expr::Number(value)) => write!(f, "{:?}", value)?,
                Piece::Node(Expr::Variable(name)) => f.write_str(name)?,
                Piece::Node(Expr::Function { name, operand }) => {
                    write!(f, "{}(", name)?;
                    work.push(Piece::Close);
                    work.push(Piece::Node(operand));
                }
                Piece::Node(Expr::Binary { op, left, right }) => {
                    f.write_str("(")?;
                    work.push(Piece::Close);
                    work.push(Piece::Node(right));
                    work.push(Piece::Op(*op));
                    work.push(Piece::Node(left));
                }
                Piece::Op(op) => write!(f, " {} ", op)?,
                Piece::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}
