use anyhow::Context;
use sea_orm::Set;
use uuid::Uuid;

use crate::contract::model::{Appointment, Barber, PersonName, ServiceName};
use crate::infra::storage::entity::{appointment, barber};

/// Convert a database row to a contract model
pub fn appointment_from_model(m: appointment::Model) -> anyhow::Result<Appointment> {
    let service_name: ServiceName = m
        .service_name
        .parse()
        .with_context(|| format!("appointment {} has a corrupt service name", m.id))?;
    Ok(Appointment {
        id: m.id,
        duration: m.duration,
        email: m.email,
        name: PersonName::new(m.first_name, m.last_name),
        phone_number: m.phone_number,
        service_name,
        time: m.time,
        barber_id: m.barber_id,
    })
}

pub fn appointment_to_active(a: Appointment) -> appointment::ActiveModel {
    appointment::ActiveModel {
        id: Set(a.id),
        duration: Set(a.duration),
        email: Set(a.email),
        first_name: Set(a.name.first),
        last_name: Set(a.name.last),
        phone_number: Set(a.phone_number),
        service_name: Set(a.service_name.as_str().to_owned()),
        time: Set(a.time),
        barber_id: Set(a.barber_id),
    }
}

pub fn decode_appointment_ids(raw: &serde_json::Value) -> anyhow::Result<Vec<Uuid>> {
    if raw.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(raw.clone()).context("corrupt appointment reference list")
}

pub fn encode_appointment_ids(ids: &[Uuid]) -> serde_json::Value {
    serde_json::Value::Array(
        ids.iter()
            .map(|id| serde_json::Value::String(id.to_string()))
            .collect(),
    )
}

pub fn barber_from_model(m: barber::Model) -> anyhow::Result<Barber> {
    let appointment_ids = decode_appointment_ids(&m.appointment_ids)
        .with_context(|| format!("barber {}", m.id))?;
    Ok(Barber {
        id: m.id,
        name: PersonName::new(m.first_name, m.last_name),
        email: m.email,
        profile_image_url: m.profile_image_url,
        appointment_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_list_keeps_insertion_order() {
        let ids = vec![Uuid::new_v4(), Uuid::nil(), Uuid::new_v4()];
        let raw = encode_appointment_ids(&ids);
        assert_eq!(decode_appointment_ids(&raw).unwrap(), ids);
        assert!(decode_appointment_ids(&serde_json::Value::Null)
            .unwrap()
            .is_empty());
        assert!(decode_appointment_ids(&serde_json::json!(["not-a-uuid"])).is_err());
    }

    #[test]
    fn corrupt_service_name_is_reported() {
        let m = appointment::Model {
            id: Uuid::new_v4(),
            duration: 30,
            email: "c@x.test".into(),
            first_name: "C".into(),
            last_name: "D".into(),
            phone_number: "1".into(),
            service_name: "MASSAGE".into(),
            time: chrono::Utc::now(),
            barber_id: Uuid::new_v4(),
        };
        assert!(appointment_from_model(m).is_err());
    }
}
