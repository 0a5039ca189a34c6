use anyhow::{anyhow, Result};
use shared::PicDto;

use super::optional_birthday;
use crate::domain::models::{CustomerPic, Pic};

/// Mapper to convert between shared PIC DTOs and domain PIC models.
pub struct PicMapper;

impl PicMapper {
    /// PICs nested in a company may lack an id; a name is required.
    pub fn to_domain(dto: PicDto) -> Result<Pic> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(anyhow!("PIC has no name"));
        }

        Ok(Pic {
            id: dto.id,
            name,
            position: dto.position.trim().to_string(),
            birthday: optional_birthday(dto.birthday.as_deref(), "PIC birthday"),
            contact_numbers: dto.contact_numbers,
            emails: dto.emails,
        })
    }

    pub fn to_dto(domain: Pic) -> PicDto {
        PicDto {
            id: domain.id,
            customer_id: None,
            name: domain.name,
            position: domain.position,
            birthday: domain.birthday.map(|birthday| birthday.to_iso()),
            contact_numbers: domain.contact_numbers,
            emails: domain.emails,
        }
    }

    /// Nested PIC lists keep the rows that map and drop the rest
    pub fn to_domain_list(dtos: Vec<PicDto>) -> Vec<Pic> {
        super::map_list(dtos, "PIC", Self::to_domain)
    }

    pub fn to_customer_pic(mut dto: PicDto) -> Result<CustomerPic> {
        let customer_id = dto.customer_id.take();
        Ok(CustomerPic {
            customer_id,
            pic: Self::to_domain(dto)?,
        })
    }

    pub fn from_customer_pic(domain: CustomerPic) -> PicDto {
        let mut dto = Self::to_dto(domain.pic);
        dto.customer_id = domain.customer_id;
        dto
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::birthday::Birthday;

    #[test]
    fn test_to_domain_parses_birthday() {
        let dto = PicDto {
            name: " Budi ".to_string(),
            birthday: Some("1985-03-12T00:00:00.000Z".to_string()),
            ..Default::default()
        };
        let pic = PicMapper::to_domain(dto).unwrap();
        assert_eq!(pic.name, "Budi");
        assert_eq!(pic.birthday, Birthday::new(1985, 3, 12));
    }

    #[test]
    fn test_leap_day_birthday_survives_round_trip() {
        let dto = PicDto {
            name: "Rina".to_string(),
            birthday: Some("1990-02-29".to_string()),
            ..Default::default()
        };
        let pic = PicMapper::to_domain(dto).unwrap();
        assert_eq!(pic.birthday, Birthday::new(1990, 2, 29));
        assert_eq!(PicMapper::to_dto(pic).birthday.as_deref(), Some("1990-02-29"));
    }

    #[test]
    fn test_unreadable_birthday_is_dropped_not_fatal() {
        let dto = PicDto {
            name: "Budi".to_string(),
            birthday: Some("sometime in March".to_string()),
            ..Default::default()
        };
        assert_eq!(PicMapper::to_domain(dto).unwrap().birthday, None);
    }

    #[test]
    fn test_customer_pic_keeps_owner() {
        let dto = PicDto {
            customer_id: Some("c-1".to_string()),
            name: "Sari".to_string(),
            ..Default::default()
        };
        let row = PicMapper::to_customer_pic(dto).unwrap();
        assert_eq!(row.customer_id.as_deref(), Some("c-1"));
        assert_eq!(PicMapper::from_customer_pic(row).customer_id.as_deref(), Some("c-1"));
    }
}
