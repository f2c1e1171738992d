use crate::{
    error::GridError,
    filter::{FilterGroup, FilterRule, GroupOp, NULL_FIELD_VALUE, OpCode},
    query::{BoundParam, BoundValue, CompareOp, Predicate},
};

///
/// CompiledFilter
///
/// Result of lowering one filter tree: the outermost join determining
/// whether the predicate is AND- or OR-attached to the builder, the
/// composed predicate itself (absent when the tree holds no rules), and
/// the bindings in index order.
///

#[derive(Clone, Debug, PartialEq)]
pub struct CompiledFilter {
    pub join: GroupOp,
    pub predicate: Option<Predicate>,
    pub params: Vec<BoundParam>,
}

///
/// FilterCompiler
///
/// Recursive tree-to-predicate reducer. The only state it carries is the
/// running parameter index, owned by one `compile` call; indices are
/// assigned depth-first across the entire tree (subgroups post-order,
/// then the group's own rules in listed order), contiguously from zero.
/// Null-test rules bind nothing and leave the counter untouched.
///

#[derive(Debug, Default)]
pub struct FilterCompiler {
    next_index: u32,
    params: Vec<BoundParam>,
}

impl FilterCompiler {
    /// Lower a filter tree into one composed predicate with bindings.
    ///
    /// Any unsupported group operator or rule operator, at any depth,
    /// aborts the whole compile without emitting a predicate.
    pub fn compile(group: &FilterGroup) -> Result<CompiledFilter, GridError> {
        let join: GroupOp = group.group_op.parse()?;

        let mut compiler = Self::default();
        let predicate = compiler.compile_group(group)?;

        Ok(CompiledFilter {
            join,
            predicate,
            params: compiler.params,
        })
    }

    fn compile_group(&mut self, group: &FilterGroup) -> Result<Option<Predicate>, GridError> {
        let op: GroupOp = group.group_op.parse()?;

        let mut children = Vec::with_capacity(group.groups.len() + group.rules.len());
        for subgroup in &group.groups {
            if let Some(child) = self.compile_group(subgroup)? {
                children.push(child);
            }
        }
        for rule in &group.rules {
            children.push(self.compile_rule(rule)?);
        }

        // A childless group contributes nothing; a single child needs no
        // composition node around it.
        Ok(match children.len() {
            0 => None,
            1 => children.pop(),
            _ => Some(match op {
                GroupOp::And => Predicate::And(children),
                GroupOp::Or => Predicate::Or(children),
            }),
        })
    }

    fn compile_rule(&mut self, rule: &FilterRule) -> Result<Predicate, GridError> {
        let mut op: OpCode = rule.op.parse()?;
        let data = rule.data_text();

        // Null sentinel normalization: rewrite before dispatch so the null
        // path exists exactly once.
        if op == OpCode::Eq && data == NULL_FIELD_VALUE {
            op = OpCode::Nu;
        }

        let field = rule.field.clone();
        let predicate = match op {
            OpCode::Nu => Predicate::IsNull { field },
            OpCode::Nn => Predicate::IsNotNull { field },

            OpCode::Eq => self.compare(field, CompareOp::Eq, data),
            OpCode::Ne => self.compare(field, CompareOp::Ne, data),
            OpCode::Lt => self.compare(field, CompareOp::Lt, data),
            OpCode::Le => self.compare(field, CompareOp::Lte, data),
            OpCode::Gt => self.compare(field, CompareOp::Gt, data),
            OpCode::Ge => self.compare(field, CompareOp::Gte, data),

            OpCode::Bw => self.compare(field, CompareOp::Like, format!("{data}%")),
            OpCode::Ew => self.compare(field, CompareOp::Like, format!("%{data}")),
            OpCode::Cn => self.compare(field, CompareOp::Like, format!("%{data}%")),
            OpCode::Bn => self.compare(field, CompareOp::NotLike, format!("{data}%")),
            OpCode::En => self.compare(field, CompareOp::NotLike, format!("%{data}")),
            OpCode::Nc => self.compare(field, CompareOp::NotLike, format!("%{data}%")),

            OpCode::In => self.compare_list(field, CompareOp::In, &data),
            OpCode::Ni => self.compare_list(field, CompareOp::NotIn, &data),
        };

        Ok(predicate)
    }

    fn compare(&mut self, field: String, op: CompareOp, value: String) -> Predicate {
        let param = self.bind(BoundValue::Scalar(value));

        Predicate::Compare { field, op, param }
    }

    fn compare_list(&mut self, field: String, op: CompareOp, data: &str) -> Predicate {
        let items = data.split(',').map(|item| item.trim().to_string()).collect();
        let param = self.bind(BoundValue::List(items));

        Predicate::Compare { field, op, param }
    }

    fn bind(&mut self, value: BoundValue) -> u32 {
        let index = self.next_index;
        self.params.push(BoundParam { index, value });
        self.next_index += 1;

        index
    }
}
