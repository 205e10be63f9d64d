use crate::cli::parser::Commands;
use crate::errors::{AppError, AppResult};
use crate::models::Payload;

pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Payload {
        student_id,
        name,
        legacy,
    } = cmd
    {
        let payload = Payload::new(student_id.trim(), name.trim());

        if payload.student_id.is_empty() || payload.name.is_empty() {
            return Err(AppError::MalformedPayload(
                "student id and name must not be empty".to_string(),
            ));
        }

        let text = if *legacy {
            payload.encode_legacy()
        } else {
            payload.encode()?
        };

        println!("{}", text);
    }
    Ok(())
}
