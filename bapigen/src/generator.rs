//! Schema walking and entity generation.
//!
//! [`generate`] turns a [`ParameterSchema`] into one root entity and the
//! structure entities its nested parameters need. Root fields are emitted in
//! import, export, table order, each list in schema order.

use crate::{
    data::{
        entity::{DeclaredType, Entity, FieldKind, FieldSpec, GeneratedEntitySet, RoleTag},
        registry::StructureRegistry,
        schema::{Parameter, ParameterKind, ParameterSchema, ValueType},
    },
    error::{GenerateError, Result},
    naming,
};

/// Generates the root entity `name` in `package` plus every structure entity
/// referenced from it.
///
/// # Errors
///
/// Fails without returning a partial set if a scalar type cannot be mapped,
/// a nested local name yields no entity name, or two different structures
/// (or a structure and the root) derive the same entity name.
pub fn generate(name: &str, package: &str, schema: &ParameterSchema) -> Result<GeneratedEntitySet> {
    if name.trim().is_empty() {
        return Err(GenerateError::EmptyEntityName);
    }

    let mut root = Entity::root(name, package, schema.operation.clone());
    let mut registry = StructureRegistry::new();
    registry.reserve(name);

    let sections = [
        (RoleTag::Import, &schema.import),
        (RoleTag::Export, &schema.export),
        (RoleTag::Table, &schema.table),
    ];

    for (role, params) in sections {
        for param in params {
            let field = emit_field(param, Some(role), package, "", &mut registry)?;
            root.fields.push(field);
        }
    }

    debug!(
        "generated entity {} with {} fields and {} structures",
        root.qualified_name(),
        root.fields.len(),
        registry.len()
    );

    Ok(GeneratedEntitySet {
        root,
        structures: registry.into_entities(),
    })
}

fn emit_field(
    param: &Parameter,
    role: Option<RoleTag>,
    package: &str,
    parent: &str,
    registry: &mut StructureRegistry,
) -> Result<FieldSpec> {
    let path = if parent.is_empty() {
        param.wire_name.clone()
    } else {
        format!("{parent}.{}", param.wire_name)
    };

    let (declared_type, kind) = match &param.kind {
        ParameterKind::Scalar { value_type } => {
            let ty = ValueType::parse(value_type).ok_or_else(|| {
                GenerateError::UnsupportedValueType {
                    path: path.clone(),
                    value_type: value_type.clone(),
                }
            })?;
            (DeclaredType::Primitive(ty), FieldKind::Simple)
        }
        ParameterKind::Structure { fields } => {
            let entity = nested_entity(param, fields, package, &path, registry)?;
            (DeclaredType::Entity(entity), FieldKind::Structure)
        }
        ParameterKind::TableOfStructure { fields } => {
            let entity = nested_entity(param, fields, package, &path, registry)?;
            (
                DeclaredType::sequence_of(DeclaredType::Entity(entity)),
                FieldKind::Table,
            )
        }
    };

    // Table parameters are always declared as a sequence, whatever their element.
    let declared_type = match role {
        Some(RoleTag::Table) if !declared_type.is_sequence() => {
            DeclaredType::sequence_of(declared_type)
        }
        _ => declared_type,
    };
    let kind = match role {
        Some(RoleTag::Table) => FieldKind::Table,
        _ => kind,
    };

    Ok(FieldSpec {
        name: param.local_name.clone(),
        declared_type,
        wire_name: param.wire_name.clone(),
        kind,
        role,
    })
}

/// Builds the structure entity for `param`, registers it and returns its name.
fn nested_entity(
    param: &Parameter,
    fields: &[Parameter],
    package: &str,
    path: &str,
    registry: &mut StructureRegistry,
) -> Result<String> {
    let name = naming::entity_name(&param.local_name).ok_or_else(|| GenerateError::InvalidName {
        path: path.to_string(),
        local_name: param.local_name.clone(),
    })?;

    let mut entity = Entity::structure(&name, package);
    for field in fields {
        entity
            .fields
            .push(emit_field(field, None, package, path, registry)?);
    }

    if registry.insert(entity, path)? {
        debug!("registered structure {name} from {path}");
    } else {
        trace!("structure {name} from {path} already registered");
    }

    Ok(name)
}
