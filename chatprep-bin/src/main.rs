use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gumdrop::Options;
use serde::Serialize;

use chatprep::chunker::{chunk, ChunkConfig, TextChunk};
use chatprep::dictionary::Dictionary;
use chatprep::speller::suggestion::Suggestion;
use chatprep::speller::{DictionarySpeller, Speller, SpellerConfig, WordCorrection};
use chatprep::tokenizer::Tokenize;

trait OutputWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool);
    fn write_suggestions(&mut self, word: &str, suggestions: &[Suggestion]);
    fn write_text_corrections(&mut self, corrections: &[WordCorrection]);
    fn write_chunks(&mut self, chunks: &[TextChunk]);
    fn finish(&mut self);
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        println!(
            "Input: {}\t\t[{}]",
            &word,
            if is_correct { "CORRECT" } else { "INCORRECT" }
        );
    }

    fn write_suggestions(&mut self, _word: &str, suggestions: &[Suggestion]) {
        for sugg in suggestions {
            println!("{}", sugg.value());
        }
        println!();
    }

    fn write_text_corrections(&mut self, corrections: &[WordCorrection]) {
        for correction in corrections {
            println!("{:>4}: \"{}\"", correction.index, correction.original);
        }
    }

    fn write_chunks(&mut self, chunks: &[TextChunk]) {
        for chunk in chunks {
            println!("{}", chunk.complete_text());
        }
    }

    fn finish(&mut self) {}
}

#[derive(Serialize)]
struct SuggestionRequest {
    word: String,
    is_correct: bool,
    suggestions: Vec<Suggestion>,
}

#[derive(Default, Serialize)]
struct JsonWriter {
    results: Vec<SuggestionRequest>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    corrections: Vec<WordCorrection>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    chunks: Vec<TextChunk>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter::default()
    }
}

impl OutputWriter for JsonWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        self.results.push(SuggestionRequest {
            word: word.to_owned(),
            is_correct,
            suggestions: vec![],
        });
    }

    fn write_suggestions(&mut self, _word: &str, suggestions: &[Suggestion]) {
        let i = self.results.len() - 1;
        self.results[i].suggestions = suggestions.to_vec();
    }

    fn write_text_corrections(&mut self, corrections: &[WordCorrection]) {
        self.corrections.extend_from_slice(corrections);
    }

    fn write_chunks(&mut self, chunks: &[TextChunk]) {
        self.chunks.extend_from_slice(chunks);
    }

    fn finish(&mut self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap());
    }
}

fn run(
    speller: Arc<DictionarySpeller>,
    words: Vec<String>,
    writer: &mut dyn OutputWriter,
    is_always_suggesting: bool,
    config: &SpellerConfig,
) -> anyhow::Result<()> {
    for word in words {
        let is_correct = speller.clone().is_correct_with_config(&word, config);
        writer.write_correction(&word, is_correct);

        if is_always_suggesting || !is_correct {
            let suggestions = speller.clone().suggest_with_config(&word, config)?;
            writer.write_suggestions(&word, &suggestions);
        }
    }

    Ok(())
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "get suggestions for provided words")]
    Suggest(SuggestArgs),

    #[options(help = "report misspelled tokens in the provided text")]
    Check(CheckArgs),

    #[options(help = "split text into byte-bounded chunks")]
    Chunk(ChunkArgs),

    #[options(help = "print input in word-separated tokenized form")]
    Tokenize(TokenizeArgs),
}

#[derive(Debug, Options)]
struct SuggestArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "word list file, one word per line", required)]
    wordlist: PathBuf,

    #[options(short = "S", help = "always show suggestions even if word is correct")]
    always_suggest: bool,

    #[options(help = "maximum number of results")]
    nbest: Option<usize>,

    #[options(no_short, long = "no-filter", help = "keep candidates missing from the word list")]
    disable_filter: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct CheckArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "word list file, one word per line", required)]
    wordlist: PathBuf,

    #[options(no_short, long = "flag-hyphenated", help = "also flag hyphen-terminated words")]
    flag_hyphenated: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "text to be checked")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct ChunkArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "H", help = "chat-route header prepended to every chunk")]
    header: Option<String>,

    #[options(help = "byte budget for one complete chunk")]
    budget: Option<usize>,

    #[options(no_short, long = "brackets", help = "wrap chunk text in out-of-character tags")]
    wrap_in_brackets: bool,

    #[options(help = "continuation marker template, %n ordinal and %t total")]
    template: Option<String>,

    #[options(no_short, long = "mark-last", help = "render the marker on the last chunk too")]
    mark_last: bool,

    #[options(
        no_short,
        long = "no-sentence-break",
        help = "cut at the nearest space instead of preferring sentence ends"
    )]
    no_sentence_break: bool,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "text to be chunked")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct TokenizeArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "w", long = "words", help = "show words only")]
    is_words_only: bool,

    #[options(free, help = "text to be tokenized")]
    inputs: Vec<String>,
}

fn load_dictionary(path: &Path) -> anyhow::Result<Arc<Dictionary>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(Arc::new(Dictionary::from_words(
        contents.lines().map(str::trim).filter(|l| !l.is_empty()),
    )))
}

fn inputs_or_stdin(inputs: Vec<String>, separator: &str) -> String {
    if inputs.is_empty() {
        eprintln!("Reading from stdin...");
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .expect("reading stdin");
        buffer
    } else {
        inputs.join(separator)
    }
}

fn suggest(args: SuggestArgs) -> anyhow::Result<()> {
    let mut config = SpellerConfig::default();

    if let Some(v) = args.nbest {
        config.max_suggestions = v;
    }

    if args.disable_filter {
        config.filter_candidates = false;
    }

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    let words = if args.inputs.is_empty() {
        inputs_or_stdin(vec![], "\n")
            .trim()
            .split('\n')
            .map(|x| x.trim().to_string())
            .collect()
    } else {
        args.inputs
    };

    let dictionary = load_dictionary(&args.wordlist)?;
    let speller = DictionarySpeller::new(dictionary);

    run(speller, words, &mut *writer, args.always_suggest, &config)?;

    writer.finish();

    Ok(())
}

fn check(args: CheckArgs) -> anyhow::Result<()> {
    let mut config = SpellerConfig::default();

    if args.flag_hyphenated {
        config.ignore_hyphen_terminated = false;
    }

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    let text = inputs_or_stdin(args.inputs, " ");

    let dictionary = load_dictionary(&args.wordlist)?;
    let speller = DictionarySpeller::new(dictionary);

    let corrections = speller.check_text_with_config(&text, &config);
    writer.write_text_corrections(&corrections);
    writer.finish();

    Ok(())
}

fn chunk_text(args: ChunkArgs) -> anyhow::Result<()> {
    let mut config = ChunkConfig::default();

    if let Some(header) = args.header {
        config.header = header;
    }
    if let Some(budget) = args.budget {
        config.byte_budget_base = budget;
    }
    if let Some(template) = args.template {
        config.continuation_template = template;
    }
    config.wrap_in_brackets = args.wrap_in_brackets;
    config.mark_last = args.mark_last;
    config.break_on_sentence = !args.no_sentence_break;

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    let text = inputs_or_stdin(args.inputs, " ");
    let chunks = chunk(&config, &text)?;

    writer.write_chunks(&chunks);
    writer.finish();

    Ok(())
}

fn tokenize(args: TokenizeArgs) -> anyhow::Result<()> {
    let inputs = inputs_or_stdin(args.inputs, " ");
    let config = SpellerConfig::default();

    if args.is_words_only {
        for (index, word) in inputs.word_indices(&config.punctuation) {
            println!("{:>4}: \"{}\"", index, word);
        }
    } else {
        for word in inputs.words(&config.punctuation) {
            println!("{:>4}: \"{}\"", word.start_index, word.token(&inputs));
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => Ok(()),
        Some(Command::Suggest(args)) => suggest(args),
        Some(Command::Check(args)) => check(args),
        Some(Command::Chunk(args)) => chunk_text(args),
        Some(Command::Tokenize(args)) => tokenize(args),
    }
}
