use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

use crate::error::{RuntimeError, Unwind};
use crate::function::Function;
use crate::object::{Callable, Object};
use crate::interpreter::Interpreter;
use crate::token::Token;

/// A class declaration's runtime value. Immutable once declared; instances
/// and subclasses share it through `Rc`.
#[derive(Debug, Clone)]
pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<Class>>,
    pub methods: HashMap<String, Function>,
}

impl Class {
    pub fn new(name: String, superclass: Option<Rc<Class>>, methods: HashMap<String, Function>) -> Self {
        Class { name, superclass, methods }
    }

    /// Looks up a method on this class, walking the superclass chain.
    pub fn find_method(&self, name: &str) -> Option<Function> {
        if let Some(method) = self.methods.get(name) {
            return Some(method.clone());
        }

        self.superclass.as_ref().and_then(|superclass| superclass.find_method(name))
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Calling a class instantiates it.
impl Callable for Rc<Class> {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, Unwind> {
        let instance = Object::from(Instance::from(self));

        // The initializer runs against the fresh instance; whatever it does,
        // the instance is what the call returns.
        if let Some(initializer) = self.find_method("init") {
            initializer.bind(instance.clone()).call(interpreter, arguments)?;
        }

        Ok(instance)
    }

    fn arity(&self) -> usize {
        self.find_method("init").map_or(0, |initializer| initializer.arity())
    }
}

/// An instance of a class: a shared reference to the class plus this
/// instance's own field table.
#[derive(Debug, Clone)]
pub struct Instance {
    pub class: Rc<Class>,
    pub fields: HashMap<String, Object>,
}

impl Instance {
    /// Property access: fields shadow methods. A found method is bound to
    /// the instance the access went through.
    pub fn get(&self, name: &Token, instance: &Object) -> Result<Object, RuntimeError> {
        if let Some(field) = self.fields.get(&name.lexeme) {
            Ok(field.clone())
        } else if let Some(method) = self.class.find_method(&name.lexeme) {
            Ok(Object::from(method.bind(instance.clone())))
        } else {
            Err(RuntimeError {
                token: name.clone(),
                message: format!("Undefined property '{}'.", name.lexeme),
            })
        }
    }

    /// Property assignment writes the field unconditionally.
    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}

impl From<&Rc<Class>> for Instance {
    fn from(value: &Rc<Class>) -> Self {
        Instance { class: Rc::clone(value), fields: HashMap::new() }
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} instance", self.class.name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn find_method_walks_superclass_chain() {
        use std::cell::RefCell;
        use crate::environment::Environment;
        use crate::stmt::FunctionData;

        let declaration = Rc::new(FunctionData {
            name: Token::from("m"),
            params: vec![],
            body: vec![],
        });
        let closure = Rc::new(RefCell::new(Environment::default()));
        let method = Function::new(declaration, closure, false);

        let mut methods = HashMap::new();
        methods.insert(String::from("m"), method);

        let base = Rc::new(Class::new(String::from("A"), None, methods));
        let derived = Rc::new(Class::new(String::from("B"), Some(Rc::clone(&base)), HashMap::new()));

        assert!(derived.find_method("m").is_some());
        assert!(derived.find_method("missing").is_none());
    }

    #[test]
    fn set_and_get_field() {
        let class = Rc::new(Class::new(String::from("Foo"), None, HashMap::new()));
        let object = Object::from(Instance::from(&class));

        let Object::Instance(instance) = &object else { unreachable!() };
        instance.borrow_mut().set(&Token::from("value"), Object::from(12.0));

        let field = instance.borrow().get(&Token::from("value"), &object).unwrap();
        assert_eq!(field, Object::from(12.0));
    }

    #[test]
    fn undefined_property_errors() {
        let class = Rc::new(Class::new(String::from("Foo"), None, HashMap::new()));
        let object = Object::from(Instance::from(&class));

        let Object::Instance(instance) = &object else { unreachable!() };
        let result = instance.borrow().get(&Token::from("missing"), &object);

        assert!(result.is_err());
    }
}
