//! Textual rendering of types.
//!
//! Output is stable for equal inputs: union members are sorted by their
//! rendered text, so `A|B` and `B|A` print the same.

use crate::{Reflection, Type};

pub struct TypePrinter<'a, R: Reflection + ?Sized> {
    reflection: &'a R,
}

impl<'a, R: Reflection + ?Sized> TypePrinter<'a, R> {
    pub fn new(reflection: &'a R) -> Self {
        Self { reflection }
    }

    pub fn render(&self, ty: &Type) -> String {
        let mut out = String::new();
        self.write(ty, &mut out);
        out
    }

    fn write(&self, ty: &Type, out: &mut String) {
        match ty {
            Type::Never => out.push_str("never"),
            Type::Mixed => out.push_str("mixed"),
            Type::Null => out.push_str("null"),
            Type::String => out.push_str("string"),
            Type::ConstantString(value) => {
                out.push('\'');
                out.push_str(value);
                out.push('\'');
            }
            Type::Object(obj) => {
                out.push_str(self.reflection.class_name(obj.class));
                if !obj.args.is_empty() {
                    out.push('<');
                    self.write_list(&obj.args, out);
                    out.push('>');
                }
            }
            Type::Union(members) => {
                let mut rendered: Vec<String> = members.iter().map(|m| self.render(m)).collect();
                rendered.sort();
                out.push_str(&rendered.join("|"));
            }
            Type::Closure(sig) => {
                out.push_str("Closure(");
                let params: Vec<Type> = sig.params.iter().map(|p| p.ty.clone()).collect();
                self.write_list(&params, out);
                out.push_str("): ");
                self.write(&sig.return_type, out);
            }
        }
    }

    fn write_list(&self, types: &[Type], out: &mut String) {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write(ty, out);
        }
    }
}
