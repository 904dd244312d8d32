//! Static structural description of algebraic types.
//!
//! [`Shape`] is what a generator would emit as a type declaration: it names every nested
//! instantiation (`Sum_Sum_unit_int_Prod_List_int_List_int`) and tells whether the value drags
//! out-of-line sequence storage along with its inline block.

use std::fmt;

use super::{List, Prod, Sum, Unit};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Prim(&'static str),
    Unit,
    List(Box<Shape>),
    Sum(Box<Shape>, Box<Shape>),
    Prod(Box<Shape>, Box<Shape>),
}

impl Shape {
    /// Mangled type name, e.g. `List_int`, `Sum_unit_int`, `Prod_List_int_List_int`.
    pub fn type_name(&self) -> String {
        match self {
            Shape::Prim(name) => (*name).to_string(),
            Shape::Unit => "unit".to_string(),
            Shape::List(elem) => format!("List_{}", elem.type_name()),
            Shape::Sum(a, b) => format!("Sum_{}_{}", a.type_name(), b.type_name()),
            Shape::Prod(a, b) => format!("Prod_{}_{}", a.type_name(), b.type_name()),
        }
    }

    /// True when some part of the value lives outside its inline block (any sequence).
    pub fn heap_tail(&self) -> bool {
        match self {
            Shape::Prim(_) | Shape::Unit => false,
            Shape::List(_) => true,
            Shape::Sum(a, b) | Shape::Prod(a, b) => a.heap_tail() || b.heap_tail(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

/// A value that can travel through a stage channel as one owned block.
pub trait Algebraic: Send + 'static {
    fn shape() -> Shape;

    fn type_name() -> String {
        Self::shape().type_name()
    }

    /// Bytes of the inline block. Sequences count their header only.
    fn inline_size() -> usize
    where
        Self: Sized,
    {
        std::mem::size_of::<Self>()
    }
}

macro_rules! prim_algebraic {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl Algebraic for $ty {
                fn shape() -> Shape {
                    Shape::Prim($name)
                }
            }
        )*
    };
}

prim_algebraic! {
    bool => "bool",
    i8 => "char",
    u8 => "uchar",
    i16 => "short",
    u16 => "ushort",
    i32 => "int",
    u32 => "uint",
    i64 => "long",
    u64 => "ulong",
    usize => "size",
    f32 => "float",
    f64 => "double",
}

impl Algebraic for Unit {
    fn shape() -> Shape {
        Shape::Unit
    }
}

impl<T: Algebraic> Algebraic for List<T> {
    fn shape() -> Shape {
        Shape::List(Box::new(T::shape()))
    }
}

impl<A: Algebraic, B: Algebraic> Algebraic for Sum<A, B> {
    fn shape() -> Shape {
        Shape::Sum(Box::new(A::shape()), Box::new(B::shape()))
    }
}

impl<A: Algebraic, B: Algebraic> Algebraic for Prod<A, B> {
    fn shape() -> Shape {
        Shape::Prod(Box::new(A::shape()), Box::new(B::shape()))
    }
}
