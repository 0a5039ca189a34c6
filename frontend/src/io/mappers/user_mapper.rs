use anyhow::{anyhow, Result};
use shared::{PermissionDto, UserDto};

use super::{optional_birthday, require_id};
use crate::domain::models::{Permission, User};

/// Mapper to convert between shared User DTOs and domain User models.
pub struct UserMapper;

impl UserMapper {
    pub fn to_domain(dto: UserDto) -> Result<User> {
        let id = require_id(dto.id, "user")?;
        let username = dto.username.trim().to_string();
        if username.is_empty() {
            return Err(anyhow!("user {} has no username", id));
        }

        Ok(User {
            id: Some(id),
            username,
            full_name: dto.full_name,
            email: dto.email,
            role: dto.role,
            active: dto.active,
            birthday: optional_birthday(dto.birthday.as_deref(), "user birthday"),
        })
    }

    pub fn to_dto(domain: User) -> UserDto {
        UserDto {
            id: domain.id,
            username: domain.username,
            full_name: domain.full_name,
            email: domain.email,
            role: domain.role,
            active: domain.active,
            birthday: domain.birthday.map(|birthday| birthday.to_iso()),
        }
    }

    pub fn permission_to_domain(dto: PermissionDto) -> Result<Permission> {
        let module = dto.module.trim().to_string();
        if module.is_empty() {
            return Err(anyhow!("permission row has no module"));
        }
        Ok(Permission {
            module,
            can_view: dto.can_view,
            can_create: dto.can_create,
            can_edit: dto.can_edit,
            can_delete: dto.can_delete,
        })
    }
}
