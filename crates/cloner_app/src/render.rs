//! Prints the view model to the terminal. Status lines go to stderr so the
//! cloned document on stdout stays redirectable.

use cloner_core::CloneViewModel;

pub fn render(view: &CloneViewModel) {
    match view {
        CloneViewModel::ShowSubmissionForm {
            url_input,
            submitting,
            validation_error,
        } => {
            if let Some(reason) = validation_error {
                eprintln!("! {reason}");
            } else if *submitting {
                eprintln!("> submitting {url_input} ...");
            }
        }
        CloneViewModel::ShowLoadingWithError { message } => {
            eprintln!("! connection error: {message}");
        }
        CloneViewModel::ShowStatus {
            status,
            detail,
            original_url,
            job_id,
        } => match detail {
            Some(detail) => eprintln!("> [{job_id}] {original_url}: {status} ({detail})"),
            None => eprintln!("> [{job_id}] {original_url}: {status}"),
        },
        CloneViewModel::ShowStatusAndPreview {
            status,
            original_url,
            job_id,
            html,
        } => {
            eprintln!(
                "> [{job_id}] {original_url}: {status}, {} bytes of HTML",
                html.len()
            );
            println!("{html}");
        }
    }
}
