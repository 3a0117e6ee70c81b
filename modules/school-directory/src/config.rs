use rowscope_core::{
    PrivilegeDescriptor, PrivilegeRegistry, PrivilegeRegistryBuilder, RegistryError,
};

use crate::entities::{city, major, school};

/// Data privileges the system supports.
///
/// Called once during startup configuration; the resulting registry is
/// passed by reference into the request pipeline. Students deliberately
/// stay unregistered so they demonstrate the unrestricted path.
///
/// # Errors
/// Returns [`RegistryError`] on a duplicate registration; fatal at
/// startup, no partial registry is served.
pub fn data_privilege_settings() -> Result<PrivilegeRegistry, RegistryError> {
    Ok(PrivilegeRegistryBuilder::new()
        .register(PrivilegeDescriptor::total(
            "City privilege",
            "name",
            |m: &city::Model| m.name.clone().into(),
        ))?
        .register(PrivilegeDescriptor::total(
            "School privilege",
            "school_name",
            |m: &school::Model| m.school_name.clone().into(),
        ))?
        .register(PrivilegeDescriptor::total(
            "Major privilege",
            "major_name",
            |m: &major::Model| m.major_name.clone().into(),
        ))?
        .build())
}
