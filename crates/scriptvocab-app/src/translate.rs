use std::io::Write;

use anyhow::Context;
use scriptvocab_translator::UploadFile;
use scriptvocab_ui::{InputMode, TranslationForm};

use crate::cli::TranslateArgs;
use crate::state::AppState;

/// Fill the form from `args`, submit once and render the outcome.
///
/// Returns whether a result table was produced. Rejected input and API
/// failures are logged by the form.
pub async fn run<W: Write>(state: &AppState, args: TranslateArgs, out: &mut W) -> anyhow::Result<bool> {
    let translator = &state.config.translator;
    let from = args.from.unwrap_or_else(|| translator.from_lang.clone());
    let to = args.to.unwrap_or_else(|| translator.to_lang.clone());

    let mut form = TranslationForm::with_languages(&from, &to)?;
    form.set_min_word_size(args.min_word_size);
    form.set_min_appearance(args.min_appearance);

    match (args.text, args.file) {
        (_, Some(path)) => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            form.set_mode(InputMode::File);
            form.set_file(Some(UploadFile::new(name, bytes)));
        }
        (Some(text), None) => {
            form.set_mode(InputMode::Text);
            form.set_text(text);
        }
        (None, None) => form.set_mode(InputMode::Text),
    }

    let Ok(payload) = form.submit() else {
        return Ok(false);
    };

    write!(out, "{}", form.view())?;
    out.flush()?;

    let result = state.translator.submit(payload).await;
    let succeeded = result.is_ok();
    form.submission_completed(result);

    if succeeded {
        write!(out, "{}", form.view())?;
    }
    out.flush()?;

    Ok(succeeded)
}
