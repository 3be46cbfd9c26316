use crate::core::Value;
use crate::model::PropertyDescriptor;

/// Receives each property of a bean in registry order.
pub trait PropertyVisitor {
    fn visit(&mut self, descriptor: &PropertyDescriptor, value: Option<&Value>);
}

impl<F> PropertyVisitor for F
where
    F: FnMut(&PropertyDescriptor, Option<&Value>),
{
    fn visit(&mut self, descriptor: &PropertyDescriptor, value: Option<&Value>) {
        self(descriptor, value)
    }
}

/// Accumulates items handed to it one at a time.
pub trait PropertyCollector<T> {
    fn collect(&mut self, item: T);
}

impl<T> PropertyCollector<T> for Vec<T> {
    fn collect(&mut self, item: T) {
        self.push(item);
    }
}

/// Visitor that feeds `(name, value)` pairs of present properties to a collector.
pub struct PresentValues<'c, C> {
    collector: &'c mut C,
}

impl<'c, C> PresentValues<'c, C>
where
    C: PropertyCollector<(String, Value)>,
{
    pub fn new(collector: &'c mut C) -> Self {
        Self { collector }
    }
}

impl<C> PropertyVisitor for PresentValues<'_, C>
where
    C: PropertyCollector<(String, Value)>,
{
    fn visit(&mut self, descriptor: &PropertyDescriptor, value: Option<&Value>) {
        if let Some(value) = value {
            self.collector.collect((descriptor.name.clone(), value.clone()));
        }
    }
}
