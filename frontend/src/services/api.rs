use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::{
    ApiErrorBody, CreateUserRequest, CustomerDto, LoginRequest, LoginResponse, MessageDto,
    PermissionDto, PicDto, PortCallDto, PortDto, SendMessageRequest, ServiceDto, SofDto,
    ToggleUserStatusRequest, UpdateUserRequest, UserDto, VendorDto, VesselDto,
};

use super::error::ApiError;
use super::logging::Logger;
use super::session::{Session, SessionContext, SessionUser};
use crate::domain::models::{
    Customer, CustomerPic, Message, Permission, Port, PortCall, Service, SofStatus, User, Vendor,
    Vessel,
};
use crate::domain::validation::{normalize_imo, Validate};
use crate::io::mappers::customer_mapper::CustomerMapper;
use crate::io::mappers::map_list;
use crate::io::mappers::message_mapper::MessageMapper;
use crate::io::mappers::pic_mapper::PicMapper;
use crate::io::mappers::port_call_mapper::PortCallMapper;
use crate::io::mappers::reference_mapper::ReferenceMapper;
use crate::io::mappers::user_mapper::UserMapper;
use crate::io::mappers::vendor_mapper::VendorMapper;
use crate::io::mappers::vessel_mapper::VesselMapper;

const COMPONENT: &str = "api";

/// Responses come either wrapped as `{ "data": ... }` or bare
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Payload<T> {
    fn into_inner(self) -> T {
        match self {
            Payload::Wrapped { data } => data,
            Payload::Bare(data) => data,
        }
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str::<Payload<T>>(body)
        .map(Payload::into_inner)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn mapped<T>(result: anyhow::Result<T>) -> Result<T, ApiError> {
    result.map_err(|e| ApiError::Mapping(format!("{:#}", e)))
}

/// Turn a non-2xx response into an error, preferring the server's message
async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .ok()
        .and_then(|b| b.text().map(str::to_string));

    match message {
        Some(message) => ApiError::Http {
            status: status.as_u16(),
            message,
        },
        None => ApiError::HttpStatus {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown error").to_string(),
        },
    }
}

/// API client for the back-office server.
///
/// One request per call, no automatic retries. The bearer token comes from
/// the shared [`SessionContext`]; a `401` on any call ends that session.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionContext) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder, what: &str) -> Result<Response, ApiError> {
        Logger::debug_with_component(COMPONENT, what);
        builder.send().await.map_err(|e| {
            Logger::error_with_component(COMPONENT, &format!("{} failed: {}", what, e));
            ApiError::from(e)
        })
    }

    async fn check(&self, response: Response, what: &str) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            Logger::warn_with_component(COMPONENT, &format!("{} rejected the session token", what));
            self.session.end();
            return Err(ApiError::Unauthorized);
        }
        let error = error_from_response(response).await;
        Logger::warn_with_component(COMPONENT, &format!("{}: {}", what, error));
        Err(error)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder, what: &str) -> Result<T, ApiError> {
        let response = self.execute(builder, what).await?;
        let response = self.check(response, what).await?;
        let body = response.text().await?;
        decode(&body)
    }

    async fn fire(&self, builder: RequestBuilder, what: &str) -> Result<(), ApiError> {
        let response = self.execute(builder, what).await?;
        self.check(response, what).await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.fetch(self.request(Method::GET, path), &format!("GET {}", path)).await
    }

    async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let what = format!("{} {}", method, path);
        self.fetch(self.request(method, path).json(body), &what).await
    }

    async fn send_ignoring_body<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let what = format!("{} {}", method, path);
        let builder = self.request(method, path);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        self.fire(builder, &what).await
    }

    // Authentication

    /// Log in and start the session.
    ///
    /// A rejected login is reported as a plain `401` error: there is no
    /// session to end yet.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let builder = self.http.post(format!("{}/auth/login", self.base_url)).json(&request);
        let response = self.execute(builder, "POST /auth/login").await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            Logger::warn_with_component(COMPONENT, &format!("Login rejected for {}", request.username));
            return Err(ApiError::Http {
                status: 401,
                message: "Invalid username or password".to_string(),
            });
        }
        let response = self.check(response, "POST /auth/login").await?;
        let body = response.text().await?;
        let login: LoginResponse = decode(&body)?;
        if login.token.is_empty() {
            return Err(ApiError::Decode("login response has no token".to_string()));
        }

        let user = mapped(UserMapper::to_domain(login.user))?;
        let session = Session {
            token: login.token,
            user: SessionUser::from(&user),
        };
        if let Err(e) = self.session.begin(session) {
            Logger::warn_with_component(COMPONENT, &format!("Session not persisted: {:#}", e));
        }
        Logger::info_with_component(COMPONENT, &format!("Logged in as {}", user.username));
        Ok(user)
    }

    /// Local logout; the server keeps no session state
    pub fn logout(&self) {
        self.session.end();
    }

    // Customers

    pub async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        let dtos: Vec<CustomerDto> = self.get("/customer").await?;
        Ok(map_list(dtos, "customer", CustomerMapper::to_domain))
    }

    pub async fn create_customer(&self, customer: &Customer) -> Result<Customer, ApiError> {
        customer.validate()?;
        let dto = CustomerMapper::to_dto(customer.clone());
        let created: CustomerDto = self.send(Method::POST, "/customer", &dto).await?;
        mapped(CustomerMapper::to_domain(created))
    }

    pub async fn update_customer(&self, id: &str, customer: &Customer) -> Result<(), ApiError> {
        customer.validate()?;
        let dto = CustomerMapper::to_dto(customer.clone());
        self.send_ignoring_body(Method::PUT, &format!("/customer/{}", id), Some(&dto))
            .await
    }

    pub async fn delete_customer(&self, id: &str) -> Result<(), ApiError> {
        self.send_ignoring_body::<()>(Method::DELETE, &format!("/customer/{}", id), None)
            .await
    }

    pub async fn list_customer_pics(&self) -> Result<Vec<CustomerPic>, ApiError> {
        let dtos: Vec<PicDto> = self.get("/customerpic").await?;
        Ok(map_list(dtos, "customer PIC", PicMapper::to_customer_pic))
    }

    pub async fn create_customer_pic(&self, pic: &CustomerPic) -> Result<CustomerPic, ApiError> {
        pic.pic.validate()?;
        let dto = PicMapper::from_customer_pic(pic.clone());
        let created: PicDto = self.send(Method::POST, "/customerpic", &dto).await?;
        mapped(PicMapper::to_customer_pic(created))
    }

    // Vendors

    pub async fn list_vendors(&self) -> Result<Vec<Vendor>, ApiError> {
        let dtos: Vec<VendorDto> = self.get("/vendor").await?;
        Ok(map_list(dtos, "vendor", VendorMapper::to_domain))
    }

    pub async fn create_vendor(&self, vendor: &Vendor) -> Result<Vendor, ApiError> {
        vendor.validate()?;
        let dto = VendorMapper::to_dto(vendor.clone());
        let created: VendorDto = self.send(Method::POST, "/vendor", &dto).await?;
        mapped(VendorMapper::to_domain(created))
    }

    pub async fn update_vendor(&self, id: &str, vendor: &Vendor) -> Result<(), ApiError> {
        vendor.validate()?;
        let dto = VendorMapper::to_dto(vendor.clone());
        self.send_ignoring_body(Method::PUT, &format!("/vendor/{}", id), Some(&dto))
            .await
    }

    pub async fn delete_vendor(&self, id: &str) -> Result<(), ApiError> {
        self.send_ignoring_body::<()>(Method::DELETE, &format!("/vendor/{}", id), None)
            .await
    }

    // Vessels

    pub async fn list_vessels(&self) -> Result<Vec<Vessel>, ApiError> {
        let dtos: Vec<VesselDto> = self.get("/vessel").await?;
        Ok(map_list(dtos, "vessel", VesselMapper::to_domain))
    }

    pub async fn create_vessel(&self, vessel: &Vessel) -> Result<Vessel, ApiError> {
        vessel.validate()?;
        let dto = VesselMapper::to_dto(vessel.clone());
        let created: VesselDto = self.send(Method::POST, "/vessel", &dto).await?;
        mapped(VesselMapper::to_domain(created))
    }

    pub async fn update_vessel(&self, id: &str, vessel: &Vessel) -> Result<(), ApiError> {
        vessel.validate()?;
        let dto = VesselMapper::to_dto(vessel.clone());
        self.send_ignoring_body(Method::PUT, &format!("/vessel/{}", id), Some(&dto))
            .await
    }

    /// Look a vessel up by IMO number; `None` when the server has no match
    pub async fn find_vessel_by_imo(&self, imo: &str) -> Result<Option<Vessel>, ApiError> {
        let path = format!("/vessel/imo/{}", normalize_imo(imo));
        match self.get::<VesselDto>(&path).await {
            Ok(dto) => mapped(VesselMapper::to_domain(dto)).map(Some),
            Err(e) if e.status() == Some(404) => Ok(None),
            Err(e) => Err(e),
        }
    }

    // Reference data

    pub async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        let dtos: Vec<ServiceDto> = self.get("/service").await?;
        Ok(map_list(dtos, "service", ReferenceMapper::service_to_domain))
    }

    pub async fn create_service(&self, service: &Service) -> Result<Service, ApiError> {
        service.validate()?;
        let dto = ReferenceMapper::service_to_dto(service.clone());
        let created: ServiceDto = self.send(Method::POST, "/service", &dto).await?;
        mapped(ReferenceMapper::service_to_domain(created))
    }

    pub async fn list_ports(&self) -> Result<Vec<Port>, ApiError> {
        let dtos: Vec<PortDto> = self.get("/port").await?;
        Ok(map_list(dtos, "port", ReferenceMapper::port_to_domain))
    }

    pub async fn create_port(&self, port: &Port) -> Result<Port, ApiError> {
        port.validate()?;
        let dto = ReferenceMapper::port_to_dto(port.clone());
        let created: PortDto = self.send(Method::POST, "/port", &dto).await?;
        mapped(ReferenceMapper::port_to_domain(created))
    }

    pub async fn list_sof_statuses(&self) -> Result<Vec<SofStatus>, ApiError> {
        let dtos: Vec<SofDto> = self.get("/sof").await?;
        Ok(map_list(dtos, "formality status", ReferenceMapper::sof_to_domain))
    }

    pub async fn create_sof_status(&self, status: &SofStatus) -> Result<SofStatus, ApiError> {
        status.validate()?;
        let dto = ReferenceMapper::sof_to_dto(status.clone());
        let created: SofDto = self.send(Method::POST, "/sof", &dto).await?;
        mapped(ReferenceMapper::sof_to_domain(created))
    }

    // Port calls

    pub async fn list_port_calls(&self) -> Result<Vec<PortCall>, ApiError> {
        let dtos: Vec<PortCallDto> = self.get("/portcall").await?;
        Ok(map_list(dtos, "port call", PortCallMapper::to_domain))
    }

    pub async fn create_port_call(&self, call: &PortCall) -> Result<PortCall, ApiError> {
        call.validate()?;
        let dto = PortCallMapper::to_dto(call.clone());
        let created: PortCallDto = self.send(Method::POST, "/portcall", &dto).await?;
        mapped(PortCallMapper::to_domain(created))
    }

    // Users

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let dtos: Vec<UserDto> = self.get("/users").await?;
        Ok(map_list(dtos, "user", UserMapper::to_domain))
    }

    pub async fn get_user(&self, id: &str) -> Result<User, ApiError> {
        let dto: UserDto = self.get(&format!("/users/{}", id)).await?;
        mapped(UserMapper::to_domain(dto))
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, ApiError> {
        request.validate()?;
        let created: UserDto = self.send(Method::POST, "/users", request).await?;
        mapped(UserMapper::to_domain(created))
    }

    pub async fn update_user(&self, id: &str, request: &UpdateUserRequest) -> Result<(), ApiError> {
        request.validate()?;
        self.send_ignoring_body(Method::PUT, &format!("/users/{}", id), Some(request))
            .await
    }

    pub async fn set_user_active(&self, id: &str, active: bool) -> Result<(), ApiError> {
        let request = ToggleUserStatusRequest { active };
        self.send_ignoring_body(Method::PATCH, &format!("/users/{}/status", id), Some(&request))
            .await
    }

    pub async fn user_permissions(&self, id: &str) -> Result<Vec<Permission>, ApiError> {
        let dtos: Vec<PermissionDto> = self.get(&format!("/users/{}/permissions", id)).await?;
        Ok(map_list(dtos, "permission", UserMapper::permission_to_domain))
    }

    // Messages

    pub async fn list_messages(&self) -> Result<Vec<Message>, ApiError> {
        let dtos: Vec<MessageDto> = self.get("/message").await?;
        Ok(map_list(dtos, "message", MessageMapper::to_domain))
    }

    pub async fn send_message(&self, request: &SendMessageRequest) -> Result<Message, ApiError> {
        request.validate()?;
        let sent: MessageDto = self.send(Method::POST, "/message", request).await?;
        mapped(MessageMapper::to_domain(sent))
    }

    pub async fn mark_message_read(&self, id: &str) -> Result<(), ApiError> {
        self.send_ignoring_body::<()>(Method::PUT, &format!("/message/{}/read", id), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wrapped_and_bare() {
        let wrapped: Vec<ServiceDto> = decode(r#"{"data":[{"id":1,"name":"Bunkering"}]}"#).unwrap();
        let bare: Vec<ServiceDto> = decode(r#"[{"_id":"1","name":"Bunkering"}]"#).unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(bare[0].id.as_deref(), Some("1"));
    }

    #[test]
    fn test_decode_error() {
        let err = decode::<Vec<ServiceDto>>("<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
