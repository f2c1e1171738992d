///
/// EntityModel
///
/// Runtime metadata for one entity type, supplied by the store
/// collaborator. The accessor and orchestrator never inspect concrete
/// types; everything they need to know about an entity lives here.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityModel {
    /// Stable external name used for metadata lookup and routing.
    pub entity_name: String,
    /// Ordered field list (authoritative for projection defaults).
    pub fields: Vec<FieldModel>,
    /// Identifier fields in composite-key order.
    pub identifier_fields: Vec<String>,
}

impl EntityModel {
    #[must_use]
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            fields: Vec::new(),
            identifier_fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldModel {
            name: name.into(),
            kind,
        });
        self
    }

    #[must_use]
    pub fn identifier(mut self, name: impl Into<String>) -> Self {
        self.identifier_fields.push(name.into());
        self
    }

    #[must_use]
    pub fn field_model(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn is_identifier(&self, name: &str) -> bool {
        self.identifier_fields.iter().any(|f| f == name)
    }

    /// Names of plain scalar fields, in declaration order.
    ///
    /// This is the default grid projection when the caller supplies none;
    /// embedded and association fields are addressed explicitly.
    #[must_use]
    pub fn scalar_field_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| f.kind.is_scalar())
            .map(|f| f.name.clone())
            .collect()
    }
}

///
/// FieldModel
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldModel {
    pub name: String,
    pub kind: FieldKind,
}

///
/// FieldKind
///
/// Declared type tag driving write-direction coercion and read-direction
/// formatting.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    DateTime,
    Decimal,
    Int,
    Text,

    /// Value object attached to the entity, not independently persisted.
    /// Carries the embedded type name for lazy materialization.
    Embedded(String),

    /// Reference to another independently-identified entity.
    Association(AssociationModel),
}

impl FieldKind {
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool | Self::DateTime | Self::Decimal | Self::Int | Self::Text
        )
    }
}

///
/// AssociationModel
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssociationModel {
    /// Entity type name of the referenced side.
    pub target: String,
    /// Declared resolution strategy for write-direction coercion.
    pub resolution: AssociationResolution,
}

///
/// AssociationResolution
///
/// How a raw identifier written to an association field is resolved.
/// Declared in metadata rather than inferred from lookup behavior.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssociationResolution {
    /// Store the coerced identifier value itself.
    Identifier,

    /// Look the referenced entity up through the store and attach the full
    /// instance; fall back to the identifier when the lookup misses.
    Instance,
}
