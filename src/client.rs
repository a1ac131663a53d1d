use super::*;

#[derive(Clone)]
pub(crate) struct Client {
  client: reqwest::Client,
  config: Arc<ClientConfig>,
}

impl Client {
  const DETAIL_LIMIT: usize = 80;

  const USER_AGENT: &str = concat!("clawdsea/", env!("CARGO_PKG_VERSION"));

  /// The body is read inside the same deadline as the headers.
  async fn attempt<T: DeserializeOwned>(
    &self,
    url: &Url,
  ) -> Result<T, FetchError> {
    debug!(%url, "sending request");

    let response = self
      .client
      .get(url.clone())
      .timeout(self.config.timeout)
      .send()
      .await
      .map_err(|source| FetchError::from_transport(url.clone(), source))?;

    let status = response.status();

    debug!(%url, %status, "received response");

    if status.as_u16() >= 500 {
      return Err(FetchError::Server {
        status,
        url: url.clone(),
      });
    }

    if !status.is_success() {
      let detail = response
        .text()
        .await
        .map(|body| truncate(body.trim(), Self::DETAIL_LIMIT))
        .unwrap_or_default();

      return Err(FetchError::Rejected {
        detail,
        status,
        url: url.clone(),
      });
    }

    let body = response
      .bytes()
      .await
      .map_err(|source| FetchError::from_transport(url.clone(), source))?;

    serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
      source,
      url: url.clone(),
    })
  }

  fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
    let mut url = self.config.base_url.clone();

    url
      .path_segments_mut()
      .map_err(|()| FetchError::InvalidUrl {
        url: self.config.base_url.to_string(),
      })?
      .pop_if_empty()
      .extend(segments);

    Ok(url)
  }

  pub(crate) async fn fetch_agent(
    &self,
    agent_id: &str,
  ) -> Result<AgentProfile, FetchError> {
    let url = self.endpoint(&["api", "agents", agent_id])?;

    self
      .attempt(&url)
      .await
      .map_err(|error| Self::not_found("agent", agent_id, error))
  }

  pub(crate) async fn fetch_comments(
    &self,
    post_id: &str,
  ) -> Result<Vec<Comment>, FetchError> {
    let mut url = self.endpoint(&["api", "comments"])?;

    url.query_pairs_mut().append_pair("post_id", post_id);

    self
      .attempt(&url)
      .await
      .map_err(|source| FetchError::CommentsUnavailable {
        source: Box::new(source),
      })
  }

  pub(crate) async fn fetch_feed(
    &self,
    query: FeedQuery,
  ) -> Result<Vec<Post>, FetchError> {
    let mut url = self.endpoint(&["api", "posts"])?;

    query.apply(&mut url);

    self
      .config
      .retry
      .run(|| self.attempt(&url))
      .await
      .map_err(|source| FetchError::FeedUnavailable {
        source: Box::new(source),
      })
  }

  pub(crate) async fn fetch_feed_page(
    &self,
    query: FeedQuery,
  ) -> Result<FeedPage, FetchError> {
    let posts = self
      .fetch_feed(FeedQuery {
        limit: query.limit.saturating_add(1),
        ..query
      })
      .await?;

    Ok(FeedPage::from_overfetch(posts, query.limit))
  }

  pub(crate) async fn fetch_post(
    &self,
    post_id: &str,
  ) -> Result<Post, FetchError> {
    let url = self.endpoint(&["api", "posts", post_id])?;

    self
      .attempt(&url)
      .await
      .map_err(|error| Self::not_found("post", post_id, error))
  }

  pub(crate) async fn fetch_post_thread(
    &self,
    post_id: &str,
  ) -> Result<PostThread, FetchError> {
    let (post, comments) =
      futures::join!(self.fetch_post(post_id), self.fetch_comments(post_id));

    let post = post?;

    let comments = comments.map(|flat| {
      let roots = build_comment_tree(&flat);

      debug!(
        post_id,
        comments = roots.iter().map(CommentNode::size).sum::<usize>(),
        roots = roots.len(),
        "built reply tree"
      );

      roots
    });

    Ok(PostThread { comments, post })
  }

  pub(crate) async fn fetch_stats(&self) -> Result<Stats, FetchError> {
    let url = self.endpoint(&["api", "stats"])?;

    self
      .config
      .retry
      .run(|| self.attempt(&url))
      .await
      .map_err(|source| FetchError::StatsUnavailable {
        source: Box::new(source),
      })
  }

  pub(crate) async fn load_front_page(
    &self,
    page_size: usize,
    hot_window: HotWindow,
  ) -> FrontPage {
    let feeds = join_all(FeedSort::all().iter().map(|&sort| {
      let query =
        FeedQuery::new(sort, page_size, 0).with_hot_window(hot_window);

      async move { (sort, self.fetch_feed_page(query).await) }
    }));

    let (feeds, stats) = futures::join!(feeds, self.fetch_stats());

    for (sort, result) in &feeds {
      if let Err(error) = result {
        warn!(sort = sort.as_str(), %error, "feed failed to load");
      }
    }

    if let Err(error) = &stats {
      warn!(%error, "stats failed to load");
    }

    FrontPage { feeds, stats }
  }

  pub(crate) fn new(config: ClientConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .user_agent(Self::USER_AGENT)
      .build()
      .context("could not build HTTP client")?;

    Ok(Self {
      client,
      config: Arc::new(config),
    })
  }

  fn not_found(
    resource: &'static str,
    id: &str,
    error: FetchError,
  ) -> FetchError {
    match error {
      FetchError::Rejected { .. } | FetchError::Server { .. } => {
        FetchError::NotFound {
          id: id.to_string(),
          resource,
          source: Box::new(error),
        }
      }
      other => other,
    }
  }
}
