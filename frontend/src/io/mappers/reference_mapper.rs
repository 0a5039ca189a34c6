use anyhow::{anyhow, Result};
use shared::{PortDto, ServiceDto, SofDto};

use super::require_id;
use crate::domain::models::{Port, Service, SofStatus};

fn require_name(name: String, kind: &str, id: &str) -> Result<String> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(anyhow!("{} {} has no name", kind, id));
    }
    Ok(name)
}

/// Mapper for agency services, ports and formality statuses.
pub struct ReferenceMapper;

impl ReferenceMapper {
    pub fn service_to_domain(dto: ServiceDto) -> Result<Service> {
        let id = require_id(dto.id, "service")?;
        Ok(Service {
            name: require_name(dto.name, "service", &id)?,
            id: Some(id),
            description: dto.description,
        })
    }

    pub fn service_to_dto(domain: Service) -> ServiceDto {
        ServiceDto {
            id: domain.id,
            name: domain.name,
            description: domain.description,
        }
    }

    pub fn port_to_domain(dto: PortDto) -> Result<Port> {
        let id = require_id(dto.id, "port")?;
        Ok(Port {
            name: require_name(dto.name, "port", &id)?,
            id: Some(id),
            code: dto.code.trim().to_uppercase(),
            country: dto.country,
        })
    }

    pub fn port_to_dto(domain: Port) -> PortDto {
        PortDto {
            id: domain.id,
            name: domain.name,
            code: domain.code,
            country: domain.country,
        }
    }

    pub fn sof_to_domain(dto: SofDto) -> Result<SofStatus> {
        let id = require_id(dto.id, "formality status")?;
        Ok(SofStatus {
            name: require_name(dto.name, "formality status", &id)?,
            id: Some(id),
            description: dto.description,
        })
    }

    pub fn sof_to_dto(domain: SofStatus) -> SofDto {
        SofDto {
            id: domain.id,
            name: domain.name,
            description: domain.description,
        }
    }
}
