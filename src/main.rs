use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use doctopics::{init_tracing_once, parse_date, PostingsExport, SingletonMode, TopicPipeline, DOC_FILE, TOPIC_FILE};
use std::path::PathBuf;

const DEFAULT_INPUT: &str = "Manifest_GenRef.tsv";
const DEFAULT_VECTORS_FILE: &str = "corpus-vectors.csv";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Tokenize, filter and vectorize free-text CSV corpora, and fit topic models over them.
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write one row of term counts per document.
    Vectorize {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// The output CSV file to create.
        #[arg(short, long, default_value = DEFAULT_VECTORS_FILE)]
        output: PathBuf,
    },
    /// Fit a topic model and write topic terms and document topic scores.
    Topics {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Number of topics.
        #[arg(long, default_value_t = 10)]
        topics: usize,
        /// Number of passes over the corpus.
        #[arg(long, default_value_t = 100)]
        passes: usize,
        /// Seed for the initial distributions.
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Terms listed per topic.
        #[arg(long, default_value_t = 10)]
        top_terms: usize,
        #[arg(long, default_value = TOPIC_FILE)]
        topic_file: PathBuf,
        #[arg(long, default_value = DOC_FILE)]
        doc_file: PathBuf,
    },
    /// Flatten submissions and comments from dump files into a postings CSV.
    Postings {
        /// Dump files (.zst or .jsonl) or directories containing them.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// The subreddit to pull from.
        #[arg(short, long)]
        subreddit: Option<String>,
        /// First day to include, MM/DD/YYYY.
        #[arg(short, long)]
        from_date: Option<String>,
        /// Last day to include, MM/DD/YYYY.
        #[arg(short, long)]
        to_date: Option<String>,
        /// The output CSV file to create.
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        progress: bool,
    },
}

#[derive(Args, Debug)]
struct CorpusArgs {
    /// Delimited input files (.csv/.tsv) or directories containing them.
    #[arg(default_value = DEFAULT_INPUT)]
    inputs: Vec<PathBuf>,
    /// Column holding the free text.
    #[arg(long, default_value = doctopics::DEFAULT_TEXT_FIELD)]
    text_field: String,
    /// Column holding the document id.
    #[arg(long, default_value = doctopics::DEFAULT_ID_FIELD)]
    id_field: String,
    /// Number documents by position instead of reading an id column.
    #[arg(long)]
    no_id: bool,
    /// Newline-delimited stopword list.
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Keep only tokens longer than this.
    #[arg(long, default_value_t = 0)]
    min_token_len: usize,
    /// Field delimiter: `tab`, `comma` or a single character. Defaults to the file extension.
    #[arg(long, value_parser = parse_delimiter)]
    delimiter: Option<u8>,
    /// Repeat singleton removal until no singleton is left.
    #[arg(long)]
    iterative: bool,
    /// Directory for the corpus.freq / corpus.dict artifacts; caching is off without it.
    #[arg(long)]
    cache_dir: Option<PathBuf>,
    /// Rebuild the cache artifacts even if they exist.
    #[arg(long)]
    clear_cache: bool,
    #[arg(long)]
    progress: bool,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        "comma" => Ok(b','),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("unsupported delimiter `{s}`")),
    }
}

impl CorpusArgs {
    fn pipeline(self) -> TopicPipeline {
        let mut p = TopicPipeline::new()
            .inputs(&self.inputs)
            .text_field(self.text_field)
            .min_token_len(self.min_token_len)
            .clear_cache(self.clear_cache)
            .progress(self.progress);
        p = if self.no_id { p.no_id_field() } else { p.id_field(self.id_field) };
        if let Some(path) = self.stopwords {
            p = p.stopwords(path);
        }
        if let Some(d) = self.delimiter {
            p = p.delimiter(d);
        }
        if self.iterative {
            p = p.singleton_mode(SingletonMode::Iterative);
        }
        if let Some(dir) = self.cache_dir {
            p = p.cache_dir(dir);
        }
        p
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing_once();

    match cli.command {
        Command::Vectorize { corpus, output } => {
            let n = corpus.pipeline().write_vectors_csv(&output)?;
            println!("Wrote {} document vectors to {}", n, output.display());
        }
        Command::Topics { corpus, topics, passes, seed, top_terms, topic_file, doc_file } => {
            let run = corpus
                .pipeline()
                .topics(topics)
                .passes(passes)
                .seed(seed)
                .top_terms(top_terms)
                .write_topics(&topic_file, &doc_file)?;
            println!("dictionary size = {}", run.corpus.index().len());
            println!("corpus size = {}", run.corpus.len());
        }
        Command::Postings { inputs, subreddit, from_date, to_date, output, progress } => {
            let from = from_date.as_deref().map(parse_date).transpose()?;
            let to = to_date.as_deref().map(parse_date).transpose()?;
            let mut export = PostingsExport::new().date_range(from, to).progress(progress);
            if let Some(sub) = subreddit {
                export = export.subreddit(sub);
            }
            let summary = export.write_csv(&inputs, &output)?;
            println!("Wrote {} postings to {}", summary.written(), output.display());
        }
    }
    Ok(())
}
