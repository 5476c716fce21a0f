// crates/canopen-od-xdd/src/resolver/mod.rs

//! Turns a deserialized `model` container into a `canopen_od::Device`.
//!
//! The Device profile supplies identity and parameters; the
//! CommunicationNetwork profile supplies the object list, bit rates and
//! network management features.

mod identity;
mod od;
mod utils;

use self::od::ParameterMap;
use crate::error::XddError;
use crate::model::{Iso15745ProfileContainer, ProfileBody};
use canopen_od::{Device, Diagnostics};
use log::{debug, warn};

pub(crate) fn resolve_device(
    container: &Iso15745ProfileContainer,
    diag: &mut Diagnostics,
) -> Result<Device, XddError> {
    let bodies = || container.profile.iter().map(|p| &p.profile_body);

    // The Device profile contains DeviceIdentity and ApplicationProcess.
    let device_body: Option<&ProfileBody> = bodies().find(|b| b.device_identity.is_some());

    // The Comm profile contains ApplicationLayers and NetworkManagement.
    let comm_body = bodies()
        .find(|b| b.application_layers.is_some())
        .ok_or(XddError::MissingElement {
            element: "ApplicationLayers",
        })?;
    let app_layers = comm_body
        .application_layers
        .as_ref()
        .ok_or(XddError::MissingElement {
            element: "ApplicationLayers",
        })?;

    if device_body.is_none() {
        warn!("XDD: no profile with DeviceIdentity, identity is taken from the communication profile");
    }

    let mut params = ParameterMap::new();
    if let Some(process) = device_body.and_then(|b| b.application_process.as_ref()) {
        for parameter in &process.parameter_list.parameter {
            if params.insert(parameter.unique_id.as_str(), parameter).is_some() {
                debug!("XDD: parameter '{}' is defined twice", parameter.unique_id);
            }
        }
    }

    let device_identity = device_body.and_then(|b| b.device_identity.as_ref());
    let net = comm_body.network_management.as_ref();

    let mut device = Device::new();
    device.od = od::resolve_objects(&app_layers.object_list, &params, diag)?;
    device.file_info = identity::resolve_file_info(device_body.unwrap_or(comm_body), device_identity, diag);
    device.device_info = identity::resolve_device_info(
        device_identity,
        app_layers.identity.as_ref(),
        comm_body.transport_layers.as_ref(),
        net,
        diag,
    );
    device.device_commissioning =
        identity::resolve_commissioning(net.and_then(|n| n.device_commissioning.as_ref()));
    device.dummy_usage = identity::resolve_dummy_usage(app_layers.dummy_usage.as_ref(), diag);

    debug!(
        "XDD: resolved '{}' with {} entries",
        device.device_info.product_name,
        device.od.len()
    );
    Ok(device)
}
