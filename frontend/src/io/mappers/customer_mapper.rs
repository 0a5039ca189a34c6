use anyhow::{anyhow, Context, Result};
use shared::CustomerDto;

use super::pic_mapper::PicMapper;
use super::require_id;
use crate::domain::models::Customer;

/// Mapper to convert between shared Customer DTOs and domain Customer models.
pub struct CustomerMapper;

impl CustomerMapper {
    pub fn to_domain(dto: CustomerDto) -> Result<Customer> {
        let id = require_id(dto.id, "customer")?;
        let company_name = dto.company_name.trim().to_string();
        if company_name.is_empty() {
            return Err(anyhow!("customer has no company name")).context(format!("customer {}", id));
        }

        Ok(Customer {
            id: Some(id),
            company_name,
            address: dto.address,
            tax_number: dto.tax_number,
            email: dto.email,
            phone: dto.phone,
            pics: PicMapper::to_domain_list(dto.pics),
        })
    }

    pub fn to_dto(domain: Customer) -> CustomerDto {
        CustomerDto {
            id: domain.id,
            company_name: domain.company_name,
            address: domain.address,
            tax_number: domain.tax_number,
            email: domain.email,
            phone: domain.phone,
            pics: domain.pics.into_iter().map(PicMapper::to_dto).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PicDto;

    #[test]
    fn test_to_domain_requires_id() {
        let dto = CustomerDto {
            company_name: "PT Samudera Lines".to_string(),
            ..Default::default()
        };
        let err = CustomerMapper::to_domain(dto).unwrap_err();
        assert!(err.to_string().contains("no id"));
    }

    #[test]
    fn test_to_domain_drops_nameless_pics() {
        let dto = CustomerDto {
            id: Some("12".to_string()),
            company_name: "PT Samudera Lines".to_string(),
            pics: vec![
                PicDto {
                    name: "Budi".to_string(),
                    ..Default::default()
                },
                PicDto::default(),
            ],
            ..Default::default()
        };
        let customer = CustomerMapper::to_domain(dto).unwrap();
        assert_eq!(customer.pics.len(), 1);
    }

    #[test]
    fn test_round_trip() {
        let dto = CustomerDto {
            id: Some("12".to_string()),
            company_name: "PT Samudera Lines".to_string(),
            email: "ops@samudera.co.id".to_string(),
            pics: vec![PicDto {
                name: "Budi".to_string(),
                birthday: Some("1985-03-12".to_string()),
                contact_numbers: vec!["0811".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let customer = CustomerMapper::to_domain(dto.clone()).unwrap();
        assert_eq!(CustomerMapper::to_dto(customer), dto);
    }
}
