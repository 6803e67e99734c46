use crate::domain::composite::CompositeResult;
use crate::domain::export_format::ExportFormat;
use crate::infrastructure::error::InfrastructureError;

#[cfg_attr(test, mockall::automock)]
pub trait Exporter {
    fn export(
        &self,
        surface: &CompositeResult,
        format: ExportFormat,
    ) -> Result<Vec<u8>, InfrastructureError>;
}
