use anyhow::{anyhow, Context, Result};
use shared::VendorDto;

use super::pic_mapper::PicMapper;
use super::require_id;
use crate::domain::models::{KycStatus, Vendor};

/// Mapper to convert between shared Vendor DTOs and domain Vendor models.
pub struct VendorMapper;

impl VendorMapper {
    pub fn to_domain(dto: VendorDto) -> Result<Vendor> {
        let id = require_id(dto.id, "vendor")?;
        let company_name = dto.company_name.trim().to_string();
        if company_name.is_empty() {
            return Err(anyhow!("vendor has no company name")).context(format!("vendor {}", id));
        }

        Ok(Vendor {
            id: Some(id),
            company_name,
            service_category: dto.service_category,
            address: dto.address,
            email: dto.email,
            phone: dto.phone,
            kyc_status: KycStatus::from_label(&dto.kyc_status),
            pics: PicMapper::to_domain_list(dto.pics),
        })
    }

    pub fn to_dto(domain: Vendor) -> VendorDto {
        VendorDto {
            id: domain.id,
            company_name: domain.company_name,
            service_category: domain.service_category,
            address: domain.address,
            email: domain.email,
            phone: domain.phone,
            kyc_status: domain.kyc_status.label().to_string(),
            pics: domain.pics.into_iter().map(PicMapper::to_dto).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kyc_status_mapping() {
        let dto = VendorDto {
            id: Some("v1".to_string()),
            company_name: "CV Bunker Jaya".to_string(),
            kyc_status: "approved".to_string(),
            ..Default::default()
        };
        let vendor = VendorMapper::to_domain(dto).unwrap();
        assert_eq!(vendor.kyc_status, KycStatus::Approved);
        assert_eq!(VendorMapper::to_dto(vendor).kyc_status, "Approved");
    }
}
