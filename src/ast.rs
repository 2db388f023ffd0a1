use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub struct Prototype {
    /// Empty for the wrapper around a top-level expression.
    pub name: String,
    pub args: Vec<String>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(f64),
    Variable(String),
    Binary(char, Box<Expression>, Box<Expression>),
    Call(String, Vec<Expression>),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Function {
    pub prototype: Prototype,
    pub body: Expression,
}

impl Function {
    /// Wraps a top-level expression so it can be evaluated immediately.
    pub fn anonymous(body: Expression) -> Self {
        Self {
            prototype: Prototype {
                name: String::new(),
                args: Vec::new(),
            },
            body,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.prototype.name.is_empty()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum ASTNode {
    Extern(Prototype),
    Function(Function),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // numerals past f64::MAX lex as infinity, so print one that overflows too
            Expression::Number(value) if value.is_infinite() => write!(f, "1{}", "0".repeat(309)),
            Expression::Number(value) => write!(f, "{}", value),
            Expression::Variable(name) => write!(f, "{}", name),
            Expression::Binary(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op, rhs),
            Expression::Call(callee, args) => {
                write!(f, "{}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.args.join(" "))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_anonymous() {
            write!(f, "{}", self.body)
        } else {
            write!(f, "def {} {}", self.prototype, self.body)
        }
    }
}

impl fmt::Display for ASTNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ASTNode::Extern(proto) => write!(f, "extern {}", proto),
            ASTNode::Function(function) => write!(f, "{}", function),
        }
    }
}
