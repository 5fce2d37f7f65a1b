use std::collections::HashMap;
use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::{Error, RuntimeError, Unwind};
use crate::expr::*;
use crate::function::{Function, NativeFunction};
use crate::class::Class;
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::*;
use crate::token::{Token, Type};

/// Walks the syntax tree and evaluates it against a chain of environments.
///
/// Expressions evaluate to a [`Object`]; statements evaluate for their side
/// effects. Both run as `Result`s whose `Err` arm is an [`Unwind`]: either a
/// runtime error on its way to the driver or a return value on its way to the
/// active call frame.
pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<Token, usize>,
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Rc::new(RefCell::new(Environment::default()));

        for native in NativeFunction::get_globals() {
            let name = native.name.lexeme.clone();
            globals.borrow_mut().define(&name, Object::from(native));
        }

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
        }
    }

    /// Executes the statements in program order. Stops at the first runtime
    /// error and reports it.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            if let Err(unwind) = self.execute(statement) {
                match unwind {
                    Unwind::Error(error) => error.throw(),
                    Unwind::Return(_) => unreachable!("return outside of a function is a resolve error"),
                }
                return;
            }
        }
    }

    /// Records the scope distance for a variable use, keyed by its token.
    /// Uses without an entry are globals.
    pub fn resolve(&mut self, name: &Token, depth: usize) {
        self.locals.insert(name.clone(), depth);
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Unwind> {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, Unwind> {
        expr.accept(self)
    }

    /// Executes the statements against the given frame, restoring the
    /// previous frame afterwards even when the block unwinds.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<(), Unwind> {
        let previous = mem::replace(&mut self.environment, environment);

        let result = statements.iter().try_for_each(|statement| self.execute(statement));

        self.environment = previous;
        result
    }

    /// Reads a variable through its resolved depth, or from the globals if
    /// the resolver left it unannotated.
    fn look_up_variable(&self, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(name) {
            Some(distance) => self.environment.borrow().get_at(*distance, name),
            None => self.globals.borrow().get(name),
        }
    }

    fn number_operand(operator: &Token, operand: &Object) -> Result<f64, Unwind> {
        match operand {
            Object::Literal(Literal::Number(number)) => Ok(*number),
            _ => Err(RuntimeError {
                token: operator.clone(),
                message: "Operand must be a number.".to_string(),
            }.into()),
        }
    }

    fn number_operands(operator: &Token, left: &Object, right: &Object) -> Result<(f64, f64), Unwind> {
        match (left, right) {
            (Object::Literal(Literal::Number(left)), Object::Literal(Literal::Number(right))) => {
                Ok((*left, *right))
            },
            _ => Err(RuntimeError {
                token: operator.clone(),
                message: "Operands must be numbers.".to_string(),
            }.into()),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprVisitor<Result<Object, Unwind>> for Interpreter {
    fn visit_literal_expr(&mut self, literal: &Literal) -> Result<Object, Unwind> {
        Ok(Object::from(literal.clone()))
    }

    fn visit_unary_expr(&mut self, unary: &UnaryData) -> Result<Object, Unwind> {
        let right = self.evaluate(&unary.expr)?;

        match unary.operator.r#type {
            Type::Minus => Ok(Object::from(-Self::number_operand(&unary.operator, &right)?)),
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!(),
        }
    }

    fn visit_binary_expr(&mut self, binary: &BinaryData) -> Result<Object, Unwind> {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        match binary.operator.r#type {
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),

            // Plus is overloaded: numbers add, strings concatenate.
            Type::Plus => match (&left, &right) {
                (Object::Literal(Literal::Number(left)), Object::Literal(Literal::Number(right))) => {
                    Ok(Object::from(left + right))
                },
                (Object::Literal(Literal::String(left)), Object::Literal(Literal::String(right))) => {
                    Ok(Object::from(format!("{left}{right}")))
                },
                _ => Err(RuntimeError {
                    token: binary.operator.clone(),
                    message: "Operands must be two numbers or two strings.".to_string(),
                }.into()),
            },

            _ => {
                let (left, right) = Self::number_operands(&binary.operator, &left, &right)?;

                match binary.operator.r#type {
                    Type::Greater      => Ok(Object::from(left > right)),
                    Type::GreaterEqual => Ok(Object::from(left >= right)),
                    Type::Less         => Ok(Object::from(left < right)),
                    Type::LessEqual    => Ok(Object::from(left <= right)),
                    Type::Minus        => Ok(Object::from(left - right)),
                    // IEEE semantics, so dividing by zero is not an error.
                    Type::Slash        => Ok(Object::from(left / right)),
                    Type::Star         => Ok(Object::from(left * right)),
                    _ => unreachable!(),
                }
            },
        }
    }

    fn visit_logical_expr(&mut self, logical: &LogicalData) -> Result<Object, Unwind> {
        let left = self.evaluate(&logical.left)?;

        // Short-circuit with the operand value itself, not a coerced boolean.
        match logical.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&logical.right),
        }
    }

    fn visit_grouping_expr(&mut self, grouping: &GroupingData) -> Result<Object, Unwind> {
        self.evaluate(&grouping.expr)
    }

    fn visit_variable_expr(&mut self, variable: &VariableData) -> Result<Object, Unwind> {
        Ok(self.look_up_variable(&variable.name)?)
    }

    fn visit_assign_expr(&mut self, assign: &AssignData) -> Result<Object, Unwind> {
        let value = self.evaluate(&assign.value)?;

        match self.locals.get(&assign.name) {
            Some(distance) => {
                self.environment.borrow_mut().assign_at(*distance, &assign.name, value.clone());
            },
            None => self.globals.borrow_mut().assign(&assign.name, value.clone())?,
        }

        // Assignment is an expression; it yields the assigned value.
        Ok(value)
    }

    fn visit_call_expr(&mut self, call: &CallData) -> Result<Object, Unwind> {
        let callee = self.evaluate(&call.callee)?;

        let mut arguments = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        let callable: &dyn Callable = match &callee {
            Object::Function(function) => function,
            Object::NativeFunction(function) => function,
            Object::Class(class) => class,
            _ => return Err(RuntimeError {
                token: call.paren.clone(),
                message: "Can only call functions and classes.".to_string(),
            }.into()),
        };

        if arguments.len() != callable.arity() {
            return Err(RuntimeError {
                token: call.paren.clone(),
                message: format!("Expected {} arguments but got {}.", callable.arity(), arguments.len()),
            }.into());
        }

        callable.call(self, arguments)
    }

    fn visit_get_expr(&mut self, get: &GetData) -> Result<Object, Unwind> {
        let object = self.evaluate(&get.object)?;

        match &object {
            Object::Instance(instance) => {
                let value = instance.borrow().get(&get.name, &object)?;
                Ok(value)
            },
            _ => Err(RuntimeError {
                token: get.name.clone(),
                message: "Only instances have properties.".to_string(),
            }.into()),
        }
    }

    fn visit_set_expr(&mut self, set: &SetData) -> Result<Object, Unwind> {
        let object = self.evaluate(&set.object)?;

        match object {
            Object::Instance(instance) => {
                let value = self.evaluate(&set.value)?;
                instance.borrow_mut().set(&set.name, value.clone());
                Ok(value)
            },
            _ => Err(RuntimeError {
                token: set.name.clone(),
                message: "Only instances have fields.".to_string(),
            }.into()),
        }
    }

    fn visit_this_expr(&mut self, this: &ThisData) -> Result<Object, Unwind> {
        Ok(self.look_up_variable(&this.keyword)?)
    }

    fn visit_super_expr(&mut self, super_expr: &SuperData) -> Result<Object, Unwind> {
        let distance = *self.locals.get(&super_expr.keyword)
            .expect("'super' to have been resolved");

        let superclass = match self.environment.borrow().get_at(distance, &super_expr.keyword)? {
            Object::Class(class) => class,
            _ => unreachable!("'super' always binds a class"),
        };

        // The instance is always bound one frame inside the 'super' frame.
        let object = self.environment.borrow().get_at(distance - 1, &Token::from("this"))?;

        let method = superclass.find_method(&super_expr.method.lexeme)
            .ok_or_else(|| RuntimeError {
                token: super_expr.method.clone(),
                message: format!("Undefined property '{}'.", super_expr.method.lexeme),
            })?;

        Ok(Object::from(method.bind(object)))
    }
}

impl StmtVisitor<Result<(), Unwind>> for Interpreter {
    fn visit_expression_stmt(&mut self, expression: &ExpressionData) -> Result<(), Unwind> {
        self.evaluate(&expression.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, print: &PrintData) -> Result<(), Unwind> {
        let value = self.evaluate(&print.expr)?;
        println!("{value}");
        Ok(())
    }

    fn visit_var_stmt(&mut self, var: &VarData) -> Result<(), Unwind> {
        let value = match &var.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::Literal(Literal::Nil),
        };

        self.environment.borrow_mut().define(&var.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, block: &BlockData) -> Result<(), Unwind> {
        let environment = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&block.statements, Rc::new(RefCell::new(environment)))
    }

    fn visit_if_stmt(&mut self, if_stmt: &IfData) -> Result<(), Unwind> {
        if self.evaluate(&if_stmt.condition)?.is_truthy() {
            self.execute(&if_stmt.then_branch)?;
        } else if let Some(else_branch) = &if_stmt.else_branch {
            self.execute(else_branch)?;
        }

        Ok(())
    }

    fn visit_while_stmt(&mut self, while_stmt: &WhileData) -> Result<(), Unwind> {
        while self.evaluate(&while_stmt.condition)?.is_truthy() {
            self.execute(&while_stmt.body)?;
        }

        Ok(())
    }

    fn visit_function_stmt(&mut self, function: &Rc<FunctionData>) -> Result<(), Unwind> {
        // The closure captures the frame the declaration ran in.
        let value = Function::new(Rc::clone(function), Rc::clone(&self.environment), false);
        self.environment.borrow_mut().define(&function.name.lexeme, Object::from(value));
        Ok(())
    }

    fn visit_return_stmt(&mut self, return_stmt: &ReturnData) -> Result<(), Unwind> {
        let value = match &return_stmt.value {
            Some(value) => self.evaluate(value)?,
            None => Object::Literal(Literal::Nil),
        };

        Err(Unwind::Return(value))
    }

    fn visit_class_stmt(&mut self, class: &ClassData) -> Result<(), Unwind> {
        let superclass = match &class.superclass {
            Some(expression) => match self.evaluate(expression)? {
                Object::Class(superclass) => Some(superclass),
                _ => {
                    let Expr::Variable(variable) = expression else { unreachable!() };
                    return Err(RuntimeError {
                        token: variable.name.clone(),
                        message: "Superclass must be a class.".to_string(),
                    }.into());
                },
            },
            None => None,
        };

        // Two-step binding so the methods can refer to the class by name.
        self.environment.borrow_mut().define(&class.name.lexeme, Object::Literal(Literal::Nil));

        // Methods of a subclass close over an extra frame binding 'super'.
        let previous = superclass.as_ref().map(|superclass| {
            let mut environment = Environment::new(Some(Rc::clone(&self.environment)));
            environment.define("super", Object::Class(Rc::clone(superclass)));

            mem::replace(&mut self.environment, Rc::new(RefCell::new(environment)))
        });

        let mut methods = HashMap::new();
        for method in &class.methods {
            let is_initializer = method.name.lexeme == "init";
            let function = Function::new(Rc::clone(method), Rc::clone(&self.environment), is_initializer);
            methods.insert(method.name.lexeme.clone(), function);
        }

        let value = Object::Class(Rc::new(Class::new(class.name.lexeme.clone(), superclass, methods)));

        if let Some(previous) = previous {
            self.environment = previous;
        }

        self.environment.borrow_mut().assign(&class.name, value)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;
    use crate::scanner::Scanner;

    /// Parses a single expression statement and evaluates its expression.
    fn evaluate(source: &str) -> Result<Object, Unwind> {
        let tokens = Scanner::new(source).scan_tokens();
        let statements = Parser::new(tokens).parse();

        let Some(Stmt::Expression(expression)) = statements.first() else {
            panic!("expected an expression statement");
        };

        Interpreter::new().evaluate(&expression.expr)
    }

    #[test]
    fn evaluate_literal() {
        assert_eq!(evaluate("12;").unwrap(), Object::from(12.0));
        assert_eq!(evaluate("\"hello\";").unwrap(), Object::from("hello"));
        assert_eq!(evaluate("nil;").unwrap(), Object::Literal(Literal::Nil));
    }

    #[test]
    fn evaluate_unary() {
        assert_eq!(evaluate("-12;").unwrap(), Object::from(-12.0));
        assert_eq!(evaluate("!true;").unwrap(), Object::from(false));
        assert_eq!(evaluate("!nil;").unwrap(), Object::from(true));
        assert_eq!(evaluate("!0;").unwrap(), Object::from(false));
    }

    #[test]
    fn evaluate_arithmetic() {
        assert_eq!(evaluate("6 - (12 - 24);").unwrap(), Object::from(18.0));
        assert_eq!(evaluate("3 * 4 / 2;").unwrap(), Object::from(6.0));
    }

    #[test]
    fn evaluate_string_concat() {
        assert_eq!(evaluate("\"Hello\" + \"World\";").unwrap(), Object::from("HelloWorld"));
    }

    #[test]
    fn evaluate_comparison() {
        assert_eq!(evaluate("12 > 12;").unwrap(), Object::from(false));
        assert_eq!(evaluate("12 >= 12;").unwrap(), Object::from(true));
        assert_eq!(evaluate("1 < 2;").unwrap(), Object::from(true));
    }

    #[test]
    fn evaluate_equality() {
        assert_eq!(evaluate("12 == 12;").unwrap(), Object::from(true));
        assert_eq!(evaluate("12 != 12;").unwrap(), Object::from(false));
        assert_eq!(evaluate("\"a\" == \"a\";").unwrap(), Object::from(true));
        assert_eq!(evaluate("\"a\" == 1;").unwrap(), Object::from(false));
    }

    #[test]
    fn evaluate_nil_comparisons() {
        assert_eq!(evaluate("nil == nil;").unwrap(), Object::from(true));
        assert_eq!(evaluate("nil == 0;").unwrap(), Object::from(false));
        assert_eq!(evaluate("nil == false;").unwrap(), Object::from(false));
        assert_eq!(evaluate("nil == \"\";").unwrap(), Object::from(false));
    }

    #[test]
    fn evaluate_nan_inequality() {
        assert_eq!(evaluate("(0 / 0) == (0 / 0);").unwrap(), Object::from(false));
    }

    #[test]
    fn evaluate_division_by_zero() {
        assert_eq!(evaluate("1 / 0;").unwrap(), Object::from(f64::INFINITY));
    }

    #[test]
    fn evaluate_logical_operand_values() {
        assert_eq!(evaluate("\"left\" or \"right\";").unwrap(), Object::from("left"));
        assert_eq!(evaluate("nil or \"right\";").unwrap(), Object::from("right"));
        assert_eq!(evaluate("nil and \"right\";").unwrap(), Object::Literal(Literal::Nil));
        assert_eq!(evaluate("\"left\" and \"right\";").unwrap(), Object::from("right"));
    }

    #[test]
    fn evaluate_plus_type_error() {
        let result = evaluate("\"a\" + 1;");

        let Err(Unwind::Error(error)) = result else { panic!("expected a runtime error") };
        assert_eq!(error.message, "Operands must be two numbers or two strings.");
        assert_eq!(error.token.location.line, 1);
    }

    #[test]
    fn evaluate_unary_type_error() {
        let Err(Unwind::Error(error)) = evaluate("-\"muffin\";") else { panic!("expected a runtime error") };
        assert_eq!(error.message, "Operand must be a number.");
    }

    #[test]
    fn evaluate_comparison_type_error() {
        let Err(Unwind::Error(error)) = evaluate("1 < \"2\";") else { panic!("expected a runtime error") };
        assert_eq!(error.message, "Operands must be numbers.");
    }

    #[test]
    fn evaluate_undefined_variable() {
        let Err(Unwind::Error(error)) = evaluate("missing;") else { panic!("expected a runtime error") };
        assert_eq!(error.message, "Undefined variable 'missing'.");
    }

    #[test]
    fn evaluate_non_callable_call() {
        let Err(Unwind::Error(error)) = evaluate("\"not a function\"();") else { panic!("expected a runtime error") };
        assert_eq!(error.message, "Can only call functions and classes.");
    }

    #[test]
    fn clock_returns_seconds() {
        let result = evaluate("clock();").unwrap();

        let Object::Literal(Literal::Number(seconds)) = result else { panic!("expected a number") };
        assert!(seconds > 0.0);
    }
}
